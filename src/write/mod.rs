// src/write/mod.rs

pub mod csv;
pub mod parquet;
pub mod xlsx;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::table::Table;

/// Output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Comma-delimited text with a header row.
    Csv,
    /// Office Open XML spreadsheet.
    Xlsx,
    /// Apache Parquet.
    Parquet,
}

/// Recognised extensions. Anything not listed here is written as CSV.
const EXTENSIONS: &[(&str, OutputFormat)] = &[
    ("csv", OutputFormat::Csv),
    ("xls", OutputFormat::Xlsx),
    ("xlsx", OutputFormat::Xlsx),
    ("parquet", OutputFormat::Parquet),
];

impl OutputFormat {
    pub const DEFAULT: OutputFormat = OutputFormat::Csv;

    /// Pick the format from the text after the last `.` of `filename`.
    pub fn from_filename(filename: &str) -> Self {
        let ext = extension(filename);
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
            .unwrap_or(Self::DEFAULT)
    }

    pub fn from_path(path: &Path) -> Self {
        Self::from_filename(&path.to_string_lossy())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Parquet => "parquet",
        })
    }
}

/// Text after the last `.`, or the whole name when there is none.
pub fn extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(_, ext)| ext)
}

/// What ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub rows: usize,
    pub columns: usize,
    pub bytes: u64,
}

/// Where the bytes for one write actually go.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// Regular file (new or existing): written to `tmp`, then renamed over `file`.
    /// `file` is the resolved path, so symlinks are written through.
    Replace {
        file: PathBuf,
        tmp: PathBuf,
        permissions: Option<fs::Permissions>,
    },
    /// Devices, pipes and dangling links: written in place.
    Direct(PathBuf),
}

fn resolve_target(path: &Path) -> Result<Target> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            let file = fs::canonicalize(path)
                .with_context(|| format!("resolving {}", path.display()))?;
            let tmp = temp_path(&file)?;
            Ok(Target::Replace {
                file,
                tmp,
                permissions: Some(meta.permissions()),
            })
        }
        Ok(_) => Ok(Target::Direct(path.to_path_buf())),
        Err(_) if path.is_symlink() => Ok(Target::Direct(path.to_path_buf())),
        Err(_) => Ok(Target::Replace {
            file: path.to_path_buf(),
            tmp: temp_path(path)?,
            permissions: None,
        }),
    }
}

fn write_format(path: &Path, table: &Table, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => csv::write_csv(path, table.batch()),
        OutputFormat::Xlsx => xlsx::write_xlsx(path, table),
        OutputFormat::Parquet => parquet::write_parquet(path, table.batch()),
    }
}

/// Serialize `table` to `path`, creating or replacing it.
///
/// Regular files are written to a hidden `.<name>.tmp` sibling of the
/// resolved target and renamed into place once the writer has closed, so a
/// failed write leaves no file behind. Symlinks are followed and an existing
/// file keeps its permissions. Anything that is not a regular file
/// (`/dev/stdout`, a FIFO) is written directly.
#[instrument(level = "info", skip(path, table, format), fields(path = %path.as_ref().display(), %format))]
pub fn write_table<P: AsRef<Path>>(
    path: P,
    table: &Table,
    format: OutputFormat,
) -> Result<WriteSummary> {
    let path = path.as_ref();
    let start = Instant::now();

    let written_to = match resolve_target(path)? {
        Target::Direct(target) => {
            debug!(target = %target.display(), "writing in place");
            write_format(&target, table, format).with_context(|| {
                format!("writing {} table to {}", format, path.display())
            })?;
            target
        }
        Target::Replace {
            file,
            tmp,
            permissions,
        } => {
            debug!(tmp = %tmp.display(), target = %file.display(), "writing to temporary file");
            if let Err(e) = write_format(&tmp, table, format) {
                let _ = fs::remove_file(&tmp);
                return Err(e.context(format!("writing {} table to {}", format, path.display())));
            }
            if let Some(permissions) = permissions {
                if let Err(e) = fs::set_permissions(&tmp, permissions) {
                    let _ = fs::remove_file(&tmp);
                    return Err(e)
                        .with_context(|| format!("copying permissions of {}", file.display()));
                }
            }
            if let Err(e) = fs::rename(&tmp, &file) {
                let _ = fs::remove_file(&tmp);
                return Err(e).with_context(|| {
                    format!("renaming {} -> {}", tmp.display(), file.display())
                });
            }
            file
        }
    };

    let bytes = fs::metadata(&written_to)
        .with_context(|| format!("reading metadata of {}", written_to.display()))?
        .len();
    let summary = WriteSummary {
        path: path.to_path_buf(),
        format,
        rows: table.num_rows(),
        columns: table.num_value_columns(),
        bytes,
    };
    info!(
        rows = summary.rows,
        columns = summary.columns,
        bytes = summary.bytes,
        elapsed = ?start.elapsed(),
        "table written"
    );
    Ok(summary)
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("{} does not name a file", path.display()))?;
    let tmp_name = format!(".{}.tmp", name.to_string_lossy());
    Ok(match path.parent() {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}
