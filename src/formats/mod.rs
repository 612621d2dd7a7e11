//! File format adapters
//!
//! Record parsing for BED/EBED annotation lines, the sequence-appending
//! driver, and FASTA-to-flat-sequence preparation.

pub mod append;
pub mod bed;
pub mod fasta;

pub use append::{
    append_file, append_reader, write_record, AppendConfig, AppendStats, BedFormat, NamePolicy,
    OutputMode,
};
pub use bed::{BedParseError, BedRecordView};
pub use fasta::{prepare_seq_dir, PreparedSeq};
