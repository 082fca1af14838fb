use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Builds the filter: `RUST_LOG` wins, otherwise the configured level for this crate.
pub fn filter_for(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pattern_catalog={},warn", settings.level)))
}

/// Installs the global subscriber, writing to stderr. Returns `false` when one was already installed.
pub fn init(settings: &LoggingSettings) -> bool {
    let filter = filter_for(settings);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if settings.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let settings = LoggingSettings::default();
        let _ = init(&settings);
        assert!(!init(&settings));
    }
}
