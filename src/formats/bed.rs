//! BED/EBED record parsing
//!
//! Zero-copy view over one tab-separated annotation line. Coordinate
//! fields are parsed eagerly; everything else is exposed lazily as byte
//! ranges so pass-through output never re-serializes the record.

use memchr::memchr;

use crate::core::{Block, Strand};

/// Minimum column count for a simple record
pub const MIN_FIELDS: usize = 3;

/// Minimum column count for a block-structured record
pub const MIN_BLOCK_FIELDS: usize = 12;

/// Zero-copy view over a parsed annotation line
pub struct BedRecordView<'a> {
    /// Original line bytes
    line: &'a [u8],
    /// Chromosome name
    pub chrom: &'a str,
    /// Feature start (0-based, inclusive)
    pub start: u64,
    /// Feature end (exclusive)
    pub end: u64,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

/// BED parsing error (per-record, recoverable)
#[derive(Debug, thiserror::Error)]
pub enum BedParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Block lists shorter than block count {expected}: {sizes} sizes, {starts} starts")]
    BlockListTooShort {
        expected: usize,
        sizes: usize,
        starts: usize,
    },
}

impl<'a> BedRecordView<'a> {
    /// Parse a line, eagerly extracting chrom/start/end
    pub fn parse(line: &'a [u8]) -> Result<Self, BedParseError> {
        if line.is_empty() {
            return Err(BedParseError::EmptyLine);
        }

        let mut field_bounds = Vec::with_capacity(MIN_BLOCK_FIELDS);
        let mut start_pos = 0;
        while let Some(tab) = memchr(b'\t', &line[start_pos..]) {
            field_bounds.push((start_pos, start_pos + tab));
            start_pos += tab + 1;
        }
        field_bounds.push((start_pos, line.len()));

        if field_bounds.len() < MIN_FIELDS {
            return Err(BedParseError::TooFewFields {
                expected: MIN_FIELDS,
                found: field_bounds.len(),
            });
        }

        let chrom = std::str::from_utf8(&line[field_bounds[0].0..field_bounds[0].1])
            .map_err(|_| BedParseError::InvalidUtf8("chrom"))?;

        let start = parse_u64(line, field_bounds[1], "start")?;
        let end = parse_u64(line, field_bounds[2], "end")?;

        Ok(Self {
            line,
            chrom,
            start,
            end,
            field_bounds,
        })
    }

    /// Number of tab-separated fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .and_then(|(start, end)| std::str::from_utf8(&self.line[*start..*end]).ok())
    }

    /// Name field (column 4) if present
    pub fn name(&self) -> Option<&'a str> {
        self.field(3).filter(|s| !s.is_empty())
    }

    /// Score field (column 5) if present
    pub fn score(&self) -> Option<&'a str> {
        self.field(4)
    }

    /// Feature strand: forward unless column 6 is exactly `-`
    pub fn strand(&self) -> Strand {
        self.field(5).map(Strand::from_field).unwrap_or_default()
    }

    /// Whether the record carries block structure (>= 12 columns)
    pub fn has_blocks(&self) -> bool {
        self.field_count() >= MIN_BLOCK_FIELDS
    }

    /// Block count field (column 10)
    pub fn block_count(&self) -> Option<&'a str> {
        self.field(9)
    }

    /// Comma-separated block sizes (column 11)
    pub fn block_sizes(&self) -> Option<&'a str> {
        self.field(10)
    }

    /// Comma-separated block relative starts (column 12)
    pub fn block_starts(&self) -> Option<&'a str> {
        self.field(11)
    }

    /// Resolve the block structure of an EBED record.
    ///
    /// Both lists must carry at least blockCount entries; trailing extras
    /// (including the trailing comma BED12 writers emit) are ignored.
    pub fn parse_blocks(&self) -> Result<Vec<Block>, BedParseError> {
        if !self.has_blocks() {
            return Err(BedParseError::TooFewFields {
                expected: MIN_BLOCK_FIELDS,
                found: self.field_count(),
            });
        }

        let count_str = self.block_count().unwrap_or("");
        let count: usize = count_str
            .parse()
            .map_err(|_| BedParseError::InvalidNumber("block_count", count_str.to_string()))?;

        let sizes = split_number_list(self.block_sizes().unwrap_or(""), "block_sizes")?;
        let starts = split_number_list(self.block_starts().unwrap_or(""), "block_starts")?;

        if sizes.len() < count || starts.len() < count {
            return Err(BedParseError::BlockListTooShort {
                expected: count,
                sizes: sizes.len(),
                starts: starts.len(),
            });
        }

        Ok(starts
            .iter()
            .zip(sizes.iter())
            .take(count)
            .map(|(&rel_start, &size)| Block::new(rel_start, size))
            .collect())
    }
}

fn parse_u64(line: &[u8], bounds: (usize, usize), field: &'static str) -> Result<u64, BedParseError> {
    let text = std::str::from_utf8(&line[bounds.0..bounds.1])
        .map_err(|_| BedParseError::InvalidUtf8(field))?;
    text.parse()
        .map_err(|_| BedParseError::InvalidNumber(field, text.to_string()))
}

fn split_number_list(list: &str, field: &'static str) -> Result<Vec<u64>, BedParseError> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| BedParseError::InvalidNumber(field, s.to_string()))
        })
        .collect()
}
