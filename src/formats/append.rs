//! Sequence appending driver
//!
//! Sequential record loop: parse each annotation line, resolve its
//! sequence through the chromosome cache, and emit either the original
//! line with the sequence appended or a FASTA record. Malformed records
//! are skipped with a warning; missing sequence files abort the run.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::core::{
    block_labels, coord_label, create_buf_reader, extract_interval, splice_blocks, Block,
    ChromosomeCache, ConfigError, ConfigResult, LineIterator, Result,
};
use crate::formats::bed::BedRecordView;

/// Input record flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedFormat {
    /// Simple interval records
    Bed,
    /// Block-structured records (>= 12 columns)
    Ebed,
}

/// Output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Original line + tab + sequence
    #[default]
    Append,
    /// Two-line FASTA records
    Fasta,
}

/// FASTA record naming policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// The record's own name field, falling back to the feature coordinate
    #[default]
    FromRecord,
    /// Whole-feature coordinate label
    Coordinate,
    /// Joined per-block coordinate labels (EBED only)
    BlockCoordinate,
}

/// Validated, immutable run configuration
#[derive(Debug, Clone, Copy)]
pub struct AppendConfig {
    pub format: BedFormat,
    pub output: OutputMode,
    pub name: NamePolicy,
    pub print_ok: bool,
}

impl AppendConfig {
    /// Build a configuration from the raw option surface, rejecting
    /// invalid combinations before any record is read.
    pub fn new(
        format: BedFormat,
        fasta: bool,
        coord_name: bool,
        block_coord_name: bool,
        print_ok: bool,
    ) -> ConfigResult<Self> {
        if coord_name && block_coord_name {
            return Err(ConfigError::ConflictingNameOptions);
        }
        if coord_name && !fasta {
            return Err(ConfigError::NameRequiresFasta {
                option: "--coord-name",
            });
        }
        if block_coord_name && !fasta {
            return Err(ConfigError::NameRequiresFasta {
                option: "--block-coord-name",
            });
        }
        if block_coord_name && format != BedFormat::Ebed {
            return Err(ConfigError::BlockNameRequiresEbed);
        }

        let name = if coord_name {
            NamePolicy::Coordinate
        } else if block_coord_name {
            NamePolicy::BlockCoordinate
        } else {
            NamePolicy::FromRecord
        };
        let output = if fasta {
            OutputMode::Fasta
        } else {
            OutputMode::Append
        };

        Ok(Self {
            format,
            output,
            name,
            print_ok,
        })
    }
}

/// Append statistics
#[derive(Debug, Default, Clone)]
pub struct AppendStats {
    /// Data records seen
    pub total: usize,
    /// Records that produced output
    pub appended: usize,
    /// Malformed or unresolvable records skipped
    pub skipped: usize,
}

/// Choose the output identifier for a record
fn record_name(view: &BedRecordView, blocks: Option<&[Block]>, policy: NamePolicy) -> String {
    match policy {
        NamePolicy::Coordinate => coord_label(view.chrom, view.start, view.end),
        NamePolicy::BlockCoordinate => {
            block_labels(view.chrom, view.start, blocks.unwrap_or(&[]), view.strand()).join(",")
        }
        NamePolicy::FromRecord => view
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| coord_label(view.chrom, view.start, view.end)),
    }
}

/// Emit one output unit for a resolved record.
///
/// The sequence is already strand-corrected; no further reversal happens
/// here. `name` is only consulted in FASTA mode.
pub fn write_record<W: Write>(
    out: &mut W,
    raw_line: &str,
    name: &str,
    seq: &[u8],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Fasta => {
            out.write_all(b">")?;
            out.write_all(name.as_bytes())?;
            out.write_all(b"\n")?;
            out.write_all(seq)?;
            out.write_all(b"\n")
        }
        OutputMode::Append => {
            out.write_all(raw_line.as_bytes())?;
            out.write_all(b"\t")?;
            out.write_all(seq)?;
            out.write_all(b"\n")
        }
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// Process one data line. Ok(true) = output written, Ok(false) = skipped.
fn process_record<W: Write>(
    line: &str,
    lineno: usize,
    out: &mut W,
    cache: &mut ChromosomeCache,
    config: &AppendConfig,
) -> Result<bool> {
    let view = match BedRecordView::parse(line.as_bytes()) {
        Ok(view) => view,
        Err(e) => {
            warn!("Ignored line {}: {} [{}]", lineno, e, line);
            return Ok(false);
        }
    };

    // Resolve block structure before touching the store so a malformed
    // record never forces a chromosome open.
    let blocks = if config.format == BedFormat::Ebed {
        match view.parse_blocks() {
            Ok(blocks) => Some(blocks),
            Err(e) => {
                warn!("Ignored line {}: {} [{}]", lineno, e, line);
                return Ok(false);
            }
        }
    } else {
        None
    };

    let strand = view.strand();
    let store = cache.get(view.chrom)?;

    let extracted = match &blocks {
        Some(blocks) => splice_blocks(store, view.start, blocks, strand),
        None => extract_interval(store, view.start, view.end, strand),
    };
    let seq = match extracted {
        Ok(seq) => seq,
        Err(e) if e.is_record_local() => {
            warn!("Ignored line {}: {} [{}]", lineno, e, line);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let name = if config.output == OutputMode::Fasta {
        record_name(&view, blocks.as_deref(), config.name)
    } else {
        String::new()
    };
    write_record(out, line, &name, &seq, config.output)?;
    Ok(true)
}

/// Run the append loop over an open reader and writer.
///
/// Output records are emitted in input order. Header lines (`#`, `track`,
/// `browser`) pass through in append mode and are dropped in FASTA mode;
/// neither counts toward the statistics.
pub fn append_reader<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    cache: &mut ChromosomeCache,
    config: &AppendConfig,
) -> Result<AppendStats> {
    let mut lines = LineIterator::new(reader);
    let mut stats = AppendStats::default();
    let mut lineno = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line?;
        lineno += 1;

        if line.is_empty() {
            continue;
        }
        if is_header(line) {
            if config.output == OutputMode::Append {
                writeln!(out, "{}", line)?;
            }
            continue;
        }

        stats.total += 1;
        if process_record(line, lineno, out, cache, config)? {
            stats.appended += 1;
            if config.print_ok {
                eprintln!("OK");
            }
        } else {
            stats.skipped += 1;
        }
    }

    Ok(stats)
}

/// Append sequence to every record of an input file.
///
/// Opens the chromosome cache over `seq_dir`, streams `input`, and writes
/// to `output` (stdout when `None`). Every store opened during the run is
/// closed exactly once, including when a hard error aborts the loop.
pub fn append_file(
    seq_dir: &Path,
    input: &Path,
    output: Option<&Path>,
    config: &AppendConfig,
) -> Result<AppendStats> {
    let reader = create_buf_reader(input)?;

    let mut out: BufWriter<Box<dyn Write>> = match output {
        Some(path) => BufWriter::new(Box::new(File::create(path)?)),
        None => BufWriter::new(Box::new(io::stdout())),
    };

    let mut cache = ChromosomeCache::new(seq_dir);
    let result = append_reader(reader, &mut out, &mut cache, config);
    cache.close_all()?;

    let stats = result?;
    out.flush()?;
    Ok(stats)
}
