// src/table/mod.rs

pub mod batch;
pub mod random;

use anyhow::{anyhow, bail, Result};
use arrow::{
    array::{Array, Float64Array, TimestampMillisecondArray},
    record_batch::RecordBatch,
};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use rand::Rng;
use std::fmt;
use tracing::debug;

use crate::index::{self, HH_PER_DAY};

/// Largest table `generate` will build, in rows.
///
/// 50M rows is roughly 2,850 years of half-hours, well inside chrono's range.
pub const MAX_ROWS: usize = 50_000_000;
pub use batch::{build_batch, build_schema};
pub use random::Readings;

/// The two table layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TableKind {
    /// One row per half-hour, one value column.
    Flat,
    /// One row per day, one column per half-hour.
    Square,
}

impl TableKind {
    /// Label of the index column.
    pub fn index_name(self) -> &'static str {
        match self {
            TableKind::Flat => "HH",
            TableKind::Square => "D",
        }
    }

    pub fn rows_per_day(self) -> usize {
        match self {
            TableKind::Flat => HH_PER_DAY,
            TableKind::Square => 1,
        }
    }

    /// Value column headers: `0` for flat, `HH0`..`HH47` for square.
    pub fn value_names(self) -> Vec<String> {
        match self {
            TableKind::Flat => vec!["0".to_string()],
            TableKind::Square => (0..HH_PER_DAY).map(|i| format!("HH{}", i)).collect(),
        }
    }

    pub fn index(self, n_days: usize) -> Vec<NaiveDateTime> {
        match self {
            TableKind::Flat => index::flat_index(n_days),
            TableKind::Square => index::square_index(n_days),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Flat => "flat",
            TableKind::Square => "square",
        })
    }
}

/// A generated table: time index plus `Float64` readings, held as one Arrow batch.
#[derive(Debug, Clone)]
pub struct Table {
    kind: TableKind,
    batch: RecordBatch,
}

impl Table {
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Columns excluding the index.
    pub fn num_value_columns(&self) -> usize {
        self.batch.num_columns() - 1
    }

    pub fn index_name(&self) -> &str {
        self.batch.schema_ref().field(0).name()
    }

    pub fn value_column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .skip(1)
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Decoded index timestamps, one per row.
    pub fn index(&self) -> Result<Vec<NaiveDateTime>> {
        let arr = self
            .batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .ok_or_else(|| anyhow!("index column is not a millisecond timestamp"))?;
        (0..arr.len())
            .map(|i| {
                arr.value_as_datetime(i)
                    .ok_or_else(|| anyhow!("index row {} is not a representable datetime", i))
            })
            .collect()
    }

    /// The `col`-th value column (0-based, index excluded).
    pub fn values(&self, col: usize) -> Option<&Float64Array> {
        if col >= self.num_value_columns() {
            return None;
        }
        self.batch
            .column(col + 1)
            .as_any()
            .downcast_ref::<Float64Array>()
    }
}

/// Build a table of the given layout over `n_days` days.
pub fn generate<R: Rng + ?Sized>(kind: TableKind, n_days: usize, rng: &mut R) -> Result<Table> {
    match kind {
        TableKind::Flat => generate_flat(n_days, rng),
        TableKind::Square => generate_square(n_days, rng),
    }
}

/// `n_days * 48` rows, single value column, index labelled `HH`.
pub fn generate_flat<R: Rng + ?Sized>(n_days: usize, rng: &mut R) -> Result<Table> {
    let kind = TableKind::Flat;
    let index = checked_index(kind, n_days)?;
    let values = Readings::new().take(rng, index.len());

    let batch = build_batch(kind.index_name(), &index, &kind.value_names(), vec![values])?;
    debug!(rows = batch.num_rows(), "built flat table");
    Ok(Table { kind, batch })
}

/// `n_days` rows of 48 readings, index labelled `D`.
///
/// Readings are drawn row by row, so a given seed fills the matrix in
/// reading order.
pub fn generate_square<R: Rng + ?Sized>(n_days: usize, rng: &mut R) -> Result<Table> {
    let kind = TableKind::Square;
    let index = checked_index(kind, n_days)?;
    let readings = Readings::new();

    let mut columns: Vec<Vec<f64>> = (0..HH_PER_DAY)
        .map(|_| Vec::with_capacity(index.len()))
        .collect();
    for _ in 0..index.len() {
        for col in columns.iter_mut() {
            col.push(readings.sample(rng));
        }
    }

    let batch = build_batch(kind.index_name(), &index, &kind.value_names(), columns)?;
    debug!(rows = batch.num_rows(), "built square table");
    Ok(Table { kind, batch })
}

fn checked_index(kind: TableKind, n_days: usize) -> Result<Vec<NaiveDateTime>> {
    let rows = n_days.checked_mul(kind.rows_per_day());
    if rows.map_or(true, |rows| rows > MAX_ROWS) {
        bail!(
            "{} days of {} data exceeds the {} row limit",
            n_days,
            kind,
            MAX_ROWS
        );
    }
    let index = kind.index(n_days);
    debug_assert_eq!(Some(index.len()), rows);
    Ok(index)
}
