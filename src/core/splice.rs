//! Interval and block resolution
//!
//! Converts coordinate records into correctly oriented sequence: single
//! contiguous intervals with optional strand correction, and
//! block-structured features spliced from sub-intervals. Also produces
//! the per-block coordinate labels used for FASTA naming.

use crate::core::dna::revcomp_inplace;
use crate::core::error::StoreResult;
use crate::core::store::SequenceStore;

/// Feature orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Parse a strand column value. Anything but `-` reads as forward.
    pub fn from_field(field: &str) -> Self {
        if field == "-" {
            Strand::Minus
        } else {
            Strand::Plus
        }
    }

    /// Strand character for display
    pub fn to_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

/// One sub-interval of a block-structured feature
///
/// `rel_start` is relative to the feature start; the block covers the
/// absolute half-open range `[feature_start + rel_start,
/// feature_start + rel_start + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub rel_start: u64,
    pub size: u64,
}

impl Block {
    pub fn new(rel_start: u64, size: u64) -> Self {
        Self { rel_start, size }
    }

    /// Absolute half-open coordinates of this block
    pub fn abs_range(&self, feature_start: u64) -> (u64, u64) {
        let start = feature_start + self.rel_start;
        (start, start + self.size)
    }
}

/// Extract one contiguous interval, strand-corrected.
///
/// Forward strand returns the raw store bytes; reverse strand returns
/// their reverse complement.
pub fn extract_interval(
    store: &mut SequenceStore,
    start0: u64,
    end1: u64,
    strand: Strand,
) -> StoreResult<Vec<u8>> {
    let mut seq = store.read(start0, end1)?;
    if strand == Strand::Minus {
        revcomp_inplace(&mut seq);
    }
    Ok(seq)
}

/// Splice a block-structured feature into one sequence.
///
/// Each block is read on the forward strand and concatenated in input
/// order (the format guarantees ascending genomic order; blocks are
/// never re-sorted here). On the reverse strand the concatenation is
/// then reverse-complemented once as a whole. Flipping per block before
/// concatenating would scramble intra-block orientation relative to
/// inter-block order.
pub fn splice_blocks(
    store: &mut SequenceStore,
    feature_start: u64,
    blocks: &[Block],
    strand: Strand,
) -> StoreResult<Vec<u8>> {
    let total: u64 = blocks.iter().map(|b| b.size).sum();
    let mut seq = Vec::with_capacity(total as usize);

    for block in blocks {
        let (start, end) = block.abs_range(feature_start);
        seq.extend_from_slice(&store.read(start, end)?);
    }

    if strand == Strand::Minus {
        revcomp_inplace(&mut seq);
    }
    Ok(seq)
}

/// `chrom:start1-end1` label for a half-open zero-based range
/// (1-based inclusive start, matching genome-browser convention)
pub fn coord_label(chrom: &str, start0: u64, end1: u64) -> String {
    format!("{}:{}-{}", chrom, start0 + 1, end1)
}

/// Coordinate labels for each block, ordered along the transcribed strand.
///
/// Labels are collected in input (ascending genomic) order, then the
/// whole list is reversed for reverse-strand features so that the joined
/// labels read 5'→3'.
pub fn block_labels(
    chrom: &str,
    feature_start: u64,
    blocks: &[Block],
    strand: Strand,
) -> Vec<String> {
    let mut labels: Vec<String> = blocks
        .iter()
        .map(|block| {
            let (start, end) = block.abs_range(feature_start);
            coord_label(chrom, start, end)
        })
        .collect();

    if strand == Strand::Minus {
        labels.reverse();
    }
    labels
}
