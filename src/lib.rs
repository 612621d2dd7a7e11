//! BedSeq - Append reference sequence to interval records
//!
//! Extracts genomic sequence for BED/EBED annotation records from a
//! directory of per-chromosome flat sequence files, emitting either the
//! original records with the sequence appended or FASTA records.
//!
//! # Features
//!
//! - Lazily-populated per-chromosome sequence store (seek or mmap backed)
//! - Strand-corrected extraction and block splicing for spliced features
//! - Coordinate and block-coordinate FASTA naming policies
//! - FASTA to `.seq` preparation for building the sequence directory
//!
//! # Example
//!
//! ```ignore
//! use bedseq::core::{ChromosomeCache, Strand, extract_interval};
//!
//! let mut cache = ChromosomeCache::new("seq/");
//! let store = cache.get("chr1")?;
//! let seq = extract_interval(store, 1000, 2000, Strand::Minus)?;
//! cache.close_all()?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    BedSeqError, Block, ChromosomeCache, ConfigError, SequenceStore, StoreError, Strand,
};
pub use crate::formats::{append_file, AppendConfig, AppendStats, BedFormat, NamePolicy, OutputMode};
