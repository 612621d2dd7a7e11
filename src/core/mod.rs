//! Core sequence-extraction engine
//!
//! This module contains the per-chromosome sequence store, the
//! lazily-populated chromosome cache, and the interval/block splicing
//! logic.

pub mod dna;
mod error;
pub mod io;
pub mod splice;
mod store;

pub use error::{
    BedSeqError, ConfigError, ConfigResult, Result, StoreError, StoreResult,
};
pub use io::{create_buf_reader, LineIterator, DEFAULT_BUFFER_SIZE};
pub use splice::{
    block_labels, coord_label, extract_interval, splice_blocks, Block, Strand,
};
pub use store::{ChromosomeCache, SequenceStore, MMAP_THRESHOLD};
