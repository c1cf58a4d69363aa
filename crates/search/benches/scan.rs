//! Benchmarks for distance computation and corpus scans.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordfuzz_search::{levenshtein_distance, CancelToken, CorpusEntry, MemoryCorpus, Query, ScanEngine, Threshold};

fn create_corpus(count: usize) -> MemoryCorpus {
    (0..count)
        .map(|i| {
            // Synthetic words of varying length over a small alphabet
            let len = 2 + i % 12;
            let word: String = (0..len)
                .map(|j| (b'a' + ((i * 7 + j * 13) % 26) as u8) as char)
                .collect();
            CorpusEntry::new(word, (count - i) as u64)
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("levenshtein_short", |b| {
        b.iter(|| levenshtein_distance(black_box("kitten"), black_box("sitting")))
    });

    c.bench_function("levenshtein_long", |b| {
        b.iter(|| {
            levenshtein_distance(
                black_box("internationalization"),
                black_box("internationalisations"),
            )
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let query = Query::new("abcdefg", 10, Threshold::MaxDistance(2)).unwrap();
    let engine = ScanEngine::new();

    for size in [1_000, 10_000, 100_000].iter() {
        let corpus = create_corpus(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| engine.scan(black_box(&corpus), black_box(&query)))
        });

        group.bench_with_input(BenchmarkId::new("sharded", size), size, |b, _| {
            b.iter(|| {
                engine.scan_sharded(black_box(corpus.as_slice()), black_box(&query), &CancelToken::new())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance, bench_scan);
criterion_main!(benches);
