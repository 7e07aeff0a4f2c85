use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Filtering follows `RUST_LOG`, defaulting
/// to `info`.
pub fn setup_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };
    result.map_err(|e| anyhow::anyhow!(e))?;

    info!(json, "Logging initialized");
    Ok(())
}
