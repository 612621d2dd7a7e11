//! BedSeq CLI entry point
//!
//! Appends reference sequence to BED/EBED records, or prepares the flat
//! per-chromosome sequence directory from FASTA input.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use bedseq::formats::{self, AppendConfig};
use bedseq::BedFormat;

/// Record format of the input file (CLI enum)
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Simple interval records: chrom, start, end, [name, score, strand]
    #[value(name = "bed")]
    Bed,
    /// Block-structured records carrying blockCount/blockSizes/blockStarts
    #[value(name = "ebed")]
    Ebed,
}

impl From<FormatArg> for BedFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bed => BedFormat::Bed,
            FormatArg::Ebed => BedFormat::Ebed,
        }
    }
}

#[derive(Parser)]
#[command(name = "bedseq")]
#[command(about = "Append reference sequence to BED/EBED interval records")]
#[command(version)]
#[command(author = "BedSeq Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append sequence to interval records
    Append {
        /// Directory of per-chromosome <chrom>.seq files
        seq_dir: PathBuf,
        /// Input BED/EBED file
        input: PathBuf,
        /// Record format of the input
        format: FormatArg,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Write FASTA records instead of appending a sequence column
        #[arg(long)]
        fasta: bool,
        /// Use the feature coordinate as FASTA name (requires --fasta)
        #[arg(long = "coord-name")]
        coord_name: bool,
        /// Use joined block coordinates as FASTA name (requires --fasta and ebed)
        #[arg(long = "block-coord-name")]
        block_coord_name: bool,
        /// Print OK to stderr after each successful record
        #[arg(long = "print-ok")]
        print_ok: bool,
    },
    /// Convert FASTA into per-record <name>.seq files
    Prepare {
        /// Input FASTA file
        fasta: PathBuf,
        /// Output directory for the .seq files
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Append {
            seq_dir,
            input,
            format,
            output,
            fasta,
            coord_name,
            block_coord_name,
            print_ok,
        } => {
            let config =
                AppendConfig::new(format.into(), fasta, coord_name, block_coord_name, print_ok)?;

            let stats = formats::append_file(&seq_dir, &input, output.as_deref(), &config)
                .map_err(|e| anyhow::anyhow!("Failed to append sequence: {}", e))?;

            eprintln!("\n=== Append Statistics ===");
            eprintln!("Total records:   {}", stats.total);
            eprintln!("Appended:        {}", stats.appended);
            eprintln!("Skipped:         {}", stats.skipped);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Prepare { fasta, out_dir } => {
            let prepared = formats::prepare_seq_dir(&fasta, &out_dir)
                .map_err(|e| anyhow::anyhow!("Failed to prepare sequence directory: {}", e))?;

            for seq in &prepared {
                println!("{}\t{}", seq.name, seq.length);
            }
            eprintln!("\n=== Prepare Statistics ===");
            eprintln!("Sequences:       {}", prepared.len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
