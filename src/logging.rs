//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` directives from [`Config::log_level`] drive filtering. With
/// `LOG_FORMAT=json` every event is written as a JSON object, otherwise as
/// human-readable text.
///
/// Must be called once, before any other tracing output.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
