use sufra_core::config::{AppConfig, LogFormat, LoadOptions, LoggingConfig};
use tracing::Level;

/// Log to stderr so stdout stays a single JSON outcome.
pub fn init(config: &LoggingConfig) {
    let log_level = config.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // A second init is a no-op.
    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Commands report their own config errors, so logging falls back to
/// defaults when the config does not load.
pub fn init_from_env() {
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    init(&config.logging);
}
