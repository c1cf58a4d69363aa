//! Corpus sources for exercising failure and cancellation paths.

use crate::cancel::CancelToken;
use crate::corpus::{CorpusEntry, CorpusSource, CorpusStream};
use crate::error::Result;
use std::io;

fn hello_entries() -> impl Iterator<Item = CorpusEntry> {
    [("hello", 5u64), ("hallo", 3), ("hullo", 1), ("world", 9)]
        .into_iter()
        .map(CorpusEntry::from)
}

/// Yields a few good entries, then a read error.
pub(crate) struct FailingCorpus;

impl CorpusSource for FailingCorpus {
    fn entries(&self) -> Result<CorpusStream<'_>> {
        let bad = std::iter::once(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "stream reset",
        )));
        Ok(Box::new(hello_entries().take(3).map(Ok).chain(bad)))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Fires `cancel` as it hands out entry number `after`.
pub(crate) struct CancelAfter {
    pub(crate) cancel: CancelToken,
    pub(crate) after: usize,
}

impl CorpusSource for CancelAfter {
    fn entries(&self) -> Result<CorpusStream<'_>> {
        Ok(Box::new(hello_entries().enumerate().map(move |(i, entry)| {
            if i == self.after {
                self.cancel.cancel();
            }
            Ok(entry)
        })))
    }

    fn describe(&self) -> String {
        format!("cancel after {}", self.after)
    }
}
