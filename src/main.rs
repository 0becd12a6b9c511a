use anyhow::{Context, Result};
use datawarehouse_etl::{run, AnyFetcher, EtlConfig, Store, VERSION};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!(version = VERSION, "startup");

    // ─── 2) open warehouse ───────────────────────────────────────────
    let config = EtlConfig::default();
    let store = Store::open(&config.database)
        .with_context(|| format!("Failed to open {}", config.database.display()))?;

    // ─── 3) fetch & load every table ─────────────────────────────────
    let fetcher = AnyFetcher::new();
    let summaries = run(&store, &fetcher, &config)?;

    let total: usize = summaries.iter().map(|s| s.rows).sum();
    info!(tables = summaries.len(), rows = total, "warehouse load complete");

    store.close().context("Failed to close warehouse database")?;
    Ok(())
}
