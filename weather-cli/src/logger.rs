use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Failure causes are diagnostics, so
/// nothing reaches the terminal unless asked for.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "weather_core=debug,weather_cli=debug,warn" } else { "off" }
}

/// Log to stderr so the card on stdout stays readable. `RUST_LOG` wins over `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_unless_verbose() {
        assert_eq!(default_filter(false), "off");
        assert!(default_filter(true).contains("weather_core=debug"));
    }
}
