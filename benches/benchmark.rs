//! Performance benchmarks for BedSeq
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use tempfile::TempDir;

use bedseq::core::dna::revcomp;
use bedseq::core::{extract_interval, splice_blocks, Block, SequenceStore, Strand};
use bedseq::formats::BedRecordView;

/// Benchmark DNA reverse complement
fn bench_revcomp(c: &mut Criterion) {
    let sequences: Vec<String> = [16usize, 256, 4096]
        .iter()
        .map(|n| "ACGT".repeat(n / 4))
        .collect();

    let mut group = c.benchmark_group("revcomp");

    for seq in &sequences {
        group.throughput(Throughput::Bytes(seq.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(seq.len()), seq, |b, seq| {
            b.iter(|| {
                let result = revcomp(black_box(seq));
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark BED/EBED line parsing
fn bench_bed_parsing(c: &mut Criterion) {
    let lines = [
        ("BED3", b"chr1\t1000\t2000".as_slice()),
        ("BED6", b"chr1\t1000\t2000\tgene1\t500\t+".as_slice()),
        (
            "EBED",
            b"chr1\t1000\t2000\tgene1\t500\t+\t1100\t1900\t0,0,0\t2\t100,100\t0,900".as_slice(),
        ),
    ];

    let mut group = c.benchmark_group("bed_parsing");

    for (name, line) in &lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| {
                let result = BedRecordView::parse(black_box(line));
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark interval extraction against an on-disk store
fn bench_extract(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chr1.seq");
    fs::write(&path, "ACGT".repeat(64 * 1024)).unwrap();
    let mut store = SequenceStore::open(&path).unwrap();

    let mut group = c.benchmark_group("extract_interval");

    for size in [100u64, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let result =
                    extract_interval(&mut store, black_box(1000), black_box(1000 + size), Strand::Minus);
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark block splicing
fn bench_splice(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chr1.seq");
    fs::write(&path, "ACGT".repeat(64 * 1024)).unwrap();
    let mut store = SequenceStore::open(&path).unwrap();

    let mut group = c.benchmark_group("splice_blocks");

    for count in [2usize, 8, 32].iter() {
        let blocks: Vec<Block> = (0..*count as u64).map(|i| Block::new(i * 200, 100)).collect();
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &blocks, |b, blocks| {
            b.iter(|| {
                let result = splice_blocks(&mut store, black_box(0), blocks, Strand::Minus);
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_revcomp,
    bench_bed_parsing,
    bench_extract,
    bench_splice,
);

criterion_main!(benches);
