pub mod cli;
pub mod index;
pub mod table;
pub mod write;

use anyhow::Result;
use tracing::info;

pub use cli::{Args, Config};
pub use table::{generate, Table, TableKind};
pub use write::{write_table, OutputFormat, WriteSummary};

/// Generate the configured table and write it out.
pub fn run(config: &Config) -> Result<WriteSummary> {
    info!(
        kind = %config.kind,
        days = config.days,
        seed = ?config.seed,
        "generating table"
    );
    let mut rng = config.rng();
    let table = generate(config.kind, config.days, &mut rng)?;
    write_table(&config.path, &table, config.format)
}
