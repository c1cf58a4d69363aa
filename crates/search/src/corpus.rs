//! Frequency corpus model and streaming decoding.
//!
//! A corpus is a text file with one `word<TAB>frequency` record per line.
//! Sources hand out lazy streams so a scan never holds the whole corpus.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// A word with its usage frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// The word itself
    pub word: String,
    /// Usage count (0 when the source record had no usable frequency)
    pub frequency: u64,
}

impl CorpusEntry {
    /// Creates a new entry.
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

impl<S: Into<String>> From<(S, u64)> for CorpusEntry {
    fn from((word, frequency): (S, u64)) -> Self {
        Self::new(word, frequency)
    }
}

/// Decode one corpus line.
///
/// Returns `None` for blank lines and lines with an empty word. A missing or
/// non-numeric frequency decodes as 0; the entry stays matchable.
pub fn parse_line(line: &str) -> Option<CorpusEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, frequency) = match line.split_once('\t') {
        Some((word, rest)) => {
            let frequency = rest.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::trace!(line, "malformed frequency, defaulting to 0");
                0
            });
            (word.trim(), frequency)
        }
        None => (line, 0),
    };

    if word.is_empty() {
        return None;
    }

    Some(CorpusEntry::new(word, frequency))
}

/// Lazy iterator of entries decoded from a buffered reader.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the stream;
/// only real read errors are yielded as `Err`.
pub struct TsvLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> TsvLines<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for TsvLines<R> {
    type Item = io::Result<CorpusEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    if matches!(line, Cow::Owned(_)) {
                        tracing::trace!(line = %line, "invalid UTF-8 in corpus line");
                    }
                    if let Some(entry) = parse_line(&line) {
                        return Some(Ok(entry));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Stream of entries produced by a [`CorpusSource`].
pub type CorpusStream<'a> = Box<dyn Iterator<Item = io::Result<CorpusEntry>> + Send + 'a>;

/// A read-only corpus that can be scanned any number of times.
///
/// Every call to [`CorpusSource::entries`] opens an independent cursor, so
/// concurrent scans never share stream state.
pub trait CorpusSource: Send + Sync {
    /// Open a fresh stream over the corpus.
    fn entries(&self) -> Result<CorpusStream<'_>>;

    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;
}

/// TSV corpus file on disk, reopened for each scan.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    /// Corpus backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for FileCorpus {
    fn entries(&self) -> Result<CorpusStream<'_>> {
        let file = File::open(&self.path)
            .map_err(|e| SearchError::corpus_unavailable(self.describe(), e))?;
        Ok(Box::new(TsvLines::new(BufReader::new(file))))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Corpus held in memory.
///
/// Needed by the sharded scan, which splits a slice across threads.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    entries: Vec<CorpusEntry>,
}

impl MemoryCorpus {
    /// Wrap already-decoded entries.
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Decode a whole TSV stream into memory.
    pub fn from_reader(reader: impl Read) -> io::Result<Self> {
        let entries = TsvLines::new(BufReader::new(reader)).collect::<io::Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Load a TSV file into memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        File::open(path)
            .and_then(Self::from_reader)
            .map_err(|e| SearchError::corpus_unavailable(path.display().to_string(), e))
    }

    /// Entries in corpus order.
    pub fn as_slice(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the corpus has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CorpusEntry> for MemoryCorpus {
    fn from_iter<I: IntoIterator<Item = CorpusEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CorpusSource for MemoryCorpus {
    fn entries(&self) -> Result<CorpusStream<'_>> {
        Ok(Box::new(self.entries.iter().cloned().map(Ok)))
    }

    fn describe(&self) -> String {
        format!("memory ({} entries)", self.entries.len())
    }
}
