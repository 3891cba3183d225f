// src/cli.rs

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use crate::table::TableKind;
use crate::write::OutputFormat;

pub const DEFAULT_DAYS: usize = 365;

/// Generate a table of random half-hourly readings and write it to a file.
#[derive(Parser, Debug)]
#[command(name = "generate_table", version)]
pub struct Args {
    /// The table format: either 'flat' or 'square'
    #[arg(value_name = "TYPE", value_enum)]
    pub kind: TableKind,

    /// What to call the file. The extension picks the format
    /// (xls/xlsx: spreadsheet, parquet: Parquet, anything else: CSV).
    pub filename: PathBuf,

    /// The number of days for which to generate data
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DAYS,
        value_parser = parse_days,
        allow_negative_numbers = true
    )]
    pub days: usize,

    /// Seed for the random readings; omit for different output every run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write this format regardless of the filename's extension
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

fn parse_days(s: &str) -> Result<usize, String> {
    let days: i64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid int value '{}': {}", s, e))?;
    usize::try_from(days).map_err(|_| format!("day count must be non-negative, got {}", days))
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub kind: TableKind,
    pub path: PathBuf,
    pub days: usize,
    pub seed: Option<u64>,
    pub format: OutputFormat,
}

impl Args {
    pub fn into_config(self) -> Config {
        let format = self
            .format
            .unwrap_or_else(|| OutputFormat::from_path(&self.filename));
        Config {
            kind: self.kind,
            path: self.filename,
            days: self.days,
            seed: self.seed,
            format,
        }
    }
}

impl Config {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
