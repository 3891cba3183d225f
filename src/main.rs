use anyhow::Result;
use clap::Parser;
use generate_table::{run, Args};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let config = Args::parse().into_config();

    // ─── 3) generate + write ─────────────────────────────────────────
    let summary = run(&config)?;
    info!(
        path = %summary.path.display(),
        format = %summary.format,
        "done"
    );
    Ok(())
}
