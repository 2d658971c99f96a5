use crate::error::AppraisalError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Picks the log level: `-q` wins, then `-v`/`-vv`, then the configured level.
pub fn resolve_level(verbose: u8, quiet: bool, configured: Option<&str>) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => configured.unwrap_or(DEFAULT_LOG_LEVEL),
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` overrides the resolved level.
pub fn init(level: &str) -> Result<(), AppraisalError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            AppraisalError::Telemetry(format!("invalid log level '{level}': {e}"))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppraisalError::Telemetry(e.to_string()))
}
