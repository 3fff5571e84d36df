use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the process.
///
/// `RUST_LOG` takes precedence when set; otherwise the given default
/// level is used for everything with offerbot crates raised to debug.
pub fn init_tracing(default_level: &str) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},offerbot=debug")));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TracingError::InitError(e.to_string()))?;

    Ok(())
}

/// Tracing error types
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing initialization error: {0}")]
    InitError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_exclusive_per_process() {
        // First init wins; a second subscriber cannot be installed.
        assert!(init_tracing("info").is_ok());
        assert!(matches!(
            init_tracing("debug"),
            Err(TracingError::InitError(_))
        ));
    }
}
