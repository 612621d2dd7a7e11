//! FASTA to flat sequence conversion
//!
//! Produces the `<chrom>.seq` layout the append driver consumes: one
//! headerless single-line sequence file per FASTA record, named after the
//! first token of the record header.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::core::{create_buf_reader, LineIterator, Result};

/// One sequence file written during preparation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSeq {
    pub name: String,
    pub length: u64,
}

struct SeqWriter {
    name: String,
    writer: BufWriter<File>,
    length: u64,
}

impl SeqWriter {
    fn create(out_dir: &Path, name: &str) -> Result<Self> {
        let file = File::create(out_dir.join(format!("{}.seq", name)))?;
        Ok(Self {
            name: name.to_string(),
            writer: BufWriter::new(file),
            length: 0,
        })
    }

    fn finish(mut self) -> Result<PreparedSeq> {
        self.writer.flush()?;
        Ok(PreparedSeq {
            name: self.name,
            length: self.length,
        })
    }
}

/// Convert a (possibly multi-record) FASTA file into per-record `.seq`
/// files under `out_dir`, stripping headers and line breaks.
///
/// Sequence lines before the first header belong to a record named after
/// the input file stem, so headerless single-sequence files convert too.
/// Returns the written records in input order.
pub fn prepare_seq_dir(fasta: &Path, out_dir: &Path) -> Result<Vec<PreparedSeq>> {
    fs::create_dir_all(out_dir)?;

    let file_stem = fasta
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequence".to_string());

    let mut lines = LineIterator::new(create_buf_reader(fasta)?);
    let mut prepared = Vec::new();
    let mut current: Option<SeqWriter> = None;
    let mut seen_header = false;

    while let Some(line) = lines.next_line() {
        let line = line?.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            seen_header = true;
            if let Some(writer) = current.take() {
                prepared.push(writer.finish()?);
            }
            match header.split_whitespace().next() {
                Some(name) => current = Some(SeqWriter::create(out_dir, name)?),
                None => warn!("Ignored FASTA record with empty header"),
            }
            continue;
        }

        if current.is_none() {
            if seen_header {
                // sequence belonging to a skipped record
                continue;
            }
            current = Some(SeqWriter::create(out_dir, &file_stem)?);
        }
        if let Some(writer) = current.as_mut() {
            writer.writer.write_all(line.as_bytes())?;
            writer.length += line.len() as u64;
        }
    }

    if let Some(writer) = current.take() {
        prepared.push(writer.finish()?);
    }
    Ok(prepared)
}
