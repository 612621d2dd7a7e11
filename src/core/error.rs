//! Error types for BedSeq
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for BedSeq operations
#[derive(Debug, Error)]
pub enum BedSeqError {
    /// Configuration errors (rejected before any record is processed)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sequence store errors
    #[error("Sequence store error: {0}")]
    Store(#[from] StoreError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the option surface, detected before processing begins
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Coordinate naming and block-coordinate naming are mutually exclusive
    #[error("--coord-name and --block-coord-name are mutually exclusive")]
    ConflictingNameOptions,

    /// Coordinate naming modes only apply to FASTA output
    #[error("{option} is only valid when --fasta is specified")]
    NameRequiresFasta { option: &'static str },

    /// Block-coordinate naming needs block-structured input
    #[error("--block-coord-name is only valid for the ebed format")]
    BlockNameRequiresEbed,
}

/// Errors raised by the per-chromosome sequence store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Sequence file missing or unreadable
    #[error("Cannot open sequence file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failed on an open store
    #[error("Read failed on sequence file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested range ends beyond the stored sequence
    #[error("Range {start}-{end} exceeds sequence length {len} in {path}")]
    OutOfRange {
        start: u64,
        end: u64,
        len: u64,
        path: PathBuf,
    },

    /// Start greater than end
    #[error("Invalid range: start ({start}) > end ({end})")]
    InvalidRange { start: u64, end: u64 },

    /// Store was already closed
    #[error("Sequence file {path} is already closed")]
    Closed { path: PathBuf },
}

impl StoreError {
    /// Whether this error condemns only the current record.
    ///
    /// Range errors skip the record and leave the store usable; open and
    /// read failures abort the run.
    pub fn is_record_local(&self) -> bool {
        matches!(
            self,
            StoreError::OutOfRange { .. } | StoreError::InvalidRange { .. }
        )
    }
}

/// Result type alias for BedSeq operations
pub type Result<T> = std::result::Result<T, BedSeqError>;

/// Result type alias for sequence store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
