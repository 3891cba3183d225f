use anyhow::{Context, Result};
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// How index timestamps are rendered in delimited text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Comma-delimited text: a header row, then the index and readings per row.
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating CSV file {}", path.display()))?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_timestamp_format(TIMESTAMP_FORMAT.to_string())
        .build(BufWriter::with_capacity(1024 * 64, file));

    writer.write(batch).context("writing CSV rows")?;

    let mut out = writer.into_inner();
    out.flush().context("flushing CSV file")?;
    Ok(())
}
