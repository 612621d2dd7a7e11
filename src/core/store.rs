//! Per-chromosome sequence storage
//!
//! A `SequenceStore` serves byte-range reads over one chromosome's flat
//! `.seq` file (single unbroken line of sequence, no header). The
//! `ChromosomeCache` opens stores lazily, one per chromosome name, and
//! owns them for the rest of the run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::core::error::{StoreError, StoreResult};

/// File size at which a store switches to memory mapping (8MB)
pub const MMAP_THRESHOLD: u64 = 8 * 1024 * 1024;

/// Random-access backend for one sequence file
enum Backend {
    /// Seek-and-read for small files
    Seek(File),
    /// Memory map for whole-chromosome files
    Mapped(Mmap),
}

/// Random-access view over one chromosome's raw sequence
pub struct SequenceStore {
    backend: Option<Backend>,
    len: u64,
    path: PathBuf,
}

impl SequenceStore {
    /// Open a sequence file for random access.
    ///
    /// Files at or above [`MMAP_THRESHOLD`] are memory mapped; smaller
    /// files are served by absolute seeks on the open handle.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source: io::Error| StoreError::Open {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();

        let backend = if len >= MMAP_THRESHOLD {
            // SAFETY: sequence files are treated as immutable for the
            // lifetime of the run.
            let mmap = unsafe { Mmap::map(&file) }.map_err(open_err)?;
            Backend::Mapped(mmap)
        } else {
            Backend::Seek(file)
        };

        Ok(Self {
            backend: Some(backend),
            len,
            path,
        })
    }

    /// Total sequence length in bases
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the backing file is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether this store is served by a memory map
    pub fn is_mapped(&self) -> bool {
        matches!(self.backend, Some(Backend::Mapped(_)))
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw bytes in the zero-based half-open range `[start0, end1)`.
    ///
    /// Ranges beyond the stored length fail with `StoreError::OutOfRange`
    /// rather than truncating. A failed read leaves the store usable: the
    /// seek backend always positions absolutely before reading.
    pub fn read(&mut self, start0: u64, end1: u64) -> StoreResult<Vec<u8>> {
        if start0 > end1 {
            return Err(StoreError::InvalidRange {
                start: start0,
                end: end1,
            });
        }
        if end1 > self.len {
            return Err(StoreError::OutOfRange {
                start: start0,
                end: end1,
                len: self.len,
                path: self.path.clone(),
            });
        }

        let backend = self.backend.as_mut().ok_or_else(|| StoreError::Closed {
            path: self.path.clone(),
        })?;

        match backend {
            Backend::Mapped(mmap) => Ok(mmap[start0 as usize..end1 as usize].to_vec()),
            Backend::Seek(file) => {
                let mut buf = vec![0u8; (end1 - start0) as usize];
                let read_err = |source: io::Error| StoreError::Read {
                    path: self.path.clone(),
                    source,
                };
                file.seek(SeekFrom::Start(start0)).map_err(read_err)?;
                file.read_exact(&mut buf).map_err(read_err)?;
                Ok(buf)
            }
        }
    }

    /// Release the backing handle or mapping. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        self.backend.take();
        Ok(())
    }
}

/// Lazily-populated map from chromosome name to open sequence store
///
/// At most one store exists per chromosome name; the map only grows.
/// `close_all` must be called once at the end of the run; `Drop` on the
/// contained stores is a backstop, not the cleanup path.
pub struct ChromosomeCache {
    seq_dir: PathBuf,
    stores: HashMap<String, SequenceStore>,
}

impl ChromosomeCache {
    /// Create an empty cache rooted at a directory of `<chrom>.seq` files
    pub fn new<P: AsRef<Path>>(seq_dir: P) -> Self {
        Self {
            seq_dir: seq_dir.as_ref().to_path_buf(),
            stores: HashMap::new(),
        }
    }

    /// Path of the sequence file for a chromosome name
    pub fn seq_path(&self, chrom: &str) -> PathBuf {
        self.seq_dir.join(format!("{}.seq", chrom))
    }

    /// Get the store for a chromosome, opening it on first reference.
    ///
    /// A missing or unreadable sequence file surfaces here as
    /// `StoreError::Open`; it is never treated as an empty sequence.
    pub fn get(&mut self, chrom: &str) -> StoreResult<&mut SequenceStore> {
        match self.stores.entry(chrom.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.seq_dir.join(format!("{}.seq", chrom));
                let store = SequenceStore::open(path)?;
                Ok(entry.insert(store))
            }
        }
    }

    /// Number of stores opened so far
    pub fn open_count(&self) -> usize {
        self.stores.len()
    }

    /// Close every store once. Call exactly once at the end of the run.
    pub fn close_all(&mut self) -> io::Result<()> {
        for store in self.stores.values_mut() {
            store.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn seq_dir_with(chroms: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (chrom, seq) in chroms {
            let mut f = File::create(dir.path().join(format!("{}.seq", chrom))).unwrap();
            f.write_all(seq.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn test_store_read_range() {
        let dir = seq_dir_with(&[("chr1", "ACGTACGT")]);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        assert_eq!(store.len(), 8);
        assert!(!store.is_mapped());
        assert_eq!(store.read(2, 6).unwrap(), b"TACG");
        assert_eq!(store.read(0, 8).unwrap(), b"ACGTACGT");
        assert_eq!(store.read(3, 3).unwrap(), b"");
    }

    #[test]
    fn test_store_out_of_range() {
        let dir = seq_dir_with(&[("chr1", "ACGTACGT")]);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        assert!(matches!(
            store.read(4, 9),
            Err(StoreError::OutOfRange { len: 8, .. })
        ));
        assert!(matches!(
            store.read(6, 2),
            Err(StoreError::InvalidRange { start: 6, end: 2 })
        ));
        // A rejected range does not disturb later reads
        assert_eq!(store.read(0, 4).unwrap(), b"ACGT");
    }

    #[test]
    fn test_store_close_idempotent() {
        let dir = seq_dir_with(&[("chr1", "ACGT")]);
        let mut store = SequenceStore::open(dir.path().join("chr1.seq")).unwrap();

        store.close().unwrap();
        assert!(store.is_closed());
        store.close().unwrap();
        assert!(matches!(store.read(0, 1), Err(StoreError::Closed { .. })));
    }

    #[test]
    fn test_store_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SequenceStore::open(dir.path().join("chrNope.seq"));
        assert!(matches!(result, Err(StoreError::Open { .. })));
    }

    #[test]
    fn test_cache_opens_once_per_chromosome() {
        let dir = seq_dir_with(&[("chr1", "ACGTACGT"), ("chr2", "TTTT")]);
        let mut cache = ChromosomeCache::new(dir.path());

        assert_eq!(cache.get("chr1").unwrap().read(0, 4).unwrap(), b"ACGT");
        assert_eq!(cache.get("chr2").unwrap().read(0, 4).unwrap(), b"TTTT");
        assert_eq!(cache.get("chr1").unwrap().read(4, 8).unwrap(), b"ACGT");
        assert_eq!(cache.open_count(), 2);
    }

    #[test]
    fn test_cache_missing_chromosome_is_hard_error() {
        let dir = seq_dir_with(&[("chr1", "ACGT")]);
        let mut cache = ChromosomeCache::new(dir.path());

        assert!(matches!(cache.get("chrX"), Err(StoreError::Open { .. })));
        // The failed open is not cached as an empty store
        assert_eq!(cache.open_count(), 0);
    }

    #[test]
    fn test_cache_close_all() {
        let dir = seq_dir_with(&[("chr1", "ACGT"), ("chr2", "GGGG")]);
        let mut cache = ChromosomeCache::new(dir.path());
        cache.get("chr1").unwrap();
        cache.get("chr2").unwrap();

        cache.close_all().unwrap();
        assert!(matches!(
            cache.get("chr1").unwrap().read(0, 1),
            Err(StoreError::Closed { .. })
        ));
    }

    #[test]
    fn test_seq_path_layout() {
        let cache = ChromosomeCache::new("/data/hg19");
        assert_eq!(cache.seq_path("chr10"), PathBuf::from("/data/hg19/chr10.seq"));
    }
}
