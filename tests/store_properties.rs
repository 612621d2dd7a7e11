//! Property-based tests for the sequence store and chromosome cache

use bedseq::core::{ChromosomeCache, SequenceStore, StoreError};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Generate a DNA sequence as raw bytes
fn dna_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'A', b'C', b'G', b'T']), 1..500)
}

fn write_seq(dir: &TempDir, chrom: &str, seq: &[u8]) {
    fs::write(dir.path().join(format!("{}.seq", chrom)), seq).unwrap();
}

proptest! {
    /// Any in-range read returns exactly the corresponding slice of the
    /// backing file
    #[test]
    fn prop_read_matches_slice(seq in dna_bytes_strategy(), a in 0usize..500, b in 0usize..500) {
        let len = seq.len();
        let (start, end) = (a.min(b) % (len + 1), b.max(a) % (len + 1));
        prop_assume!(start <= end);

        let dir = TempDir::new().unwrap();
        write_seq(&dir, "chr1", &seq);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        let got = store.read(start as u64, end as u64).unwrap();
        prop_assert_eq!(got.as_slice(), &seq[start..end]);
    }

    /// Reads never disturb each other: interleaved reads over the same
    /// store all return the right slices
    #[test]
    fn prop_interleaved_reads_independent(seq in dna_bytes_strategy()) {
        let dir = TempDir::new().unwrap();
        write_seq(&dir, "chr1", &seq);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        let len = seq.len() as u64;
        let whole = store.read(0, len).unwrap();
        let first = store.read(0, len / 2).unwrap();
        let second = store.read(len / 2, len).unwrap();

        prop_assert_eq!([first, second].concat(), whole);
    }

    /// A rejected out-of-range read leaves the store fully usable
    #[test]
    fn prop_failed_read_does_not_poison(seq in dna_bytes_strategy(), past in 1u64..100) {
        let dir = TempDir::new().unwrap();
        write_seq(&dir, "chr1", &seq);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        let len = seq.len() as u64;
        prop_assert!(
            matches!(
                store.read(0, len + past),
                Err(StoreError::OutOfRange { .. })
            ),
            "expected OutOfRange error"
        );
        prop_assert_eq!(store.read(0, len).unwrap(), seq);
    }
}

#[test]
fn test_store_reports_length_from_metadata() {
    let dir = TempDir::new().unwrap();
    write_seq(&dir, "chr1", b"ACGTACGTAC");
    let store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();
    assert_eq!(store.len(), 10);
    assert!(!store.is_empty());
}

#[test]
fn test_cache_reuses_store_across_records() {
    let dir = TempDir::new().unwrap();
    write_seq(&dir, "chr1", b"ACGTACGT");
    write_seq(&dir, "chr2", b"GGGGCCCC");

    let mut cache = ChromosomeCache::new(dir.path());
    // alternating access must not reopen
    for _ in 0..3 {
        assert_eq!(cache.get("chr1").unwrap().read(0, 2).unwrap(), b"AC");
        assert_eq!(cache.get("chr2").unwrap().read(0, 2).unwrap(), b"GG");
    }
    assert_eq!(cache.open_count(), 2);

    cache.close_all().unwrap();
    assert!(matches!(
        cache.get("chr1").unwrap().read(0, 1),
        Err(StoreError::Closed { .. })
    ));
}

#[test]
fn test_cache_missing_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let mut cache = ChromosomeCache::new(dir.path());
    match cache.get("chr9") {
        Err(StoreError::Open { path, .. }) => {
            assert!(path.ends_with("chr9.seq"));
        }
        other => panic!("expected Open error, got {:?}", other.map(|s| s.len())),
    }
}
