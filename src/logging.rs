//! Tracing subscriber setup for the command line tool.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Log level for this crate, e.g. `debug` to see every skipped record.
pub const LOG_ENV_VAR: &str = "FICSIT_LOG";

const CRATE_NAME: &str = "ficsit_extract";

/// Install a stdout subscriber. Safe to call more than once.
pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let (env_filter, log_level) = env_filter_and_log_level();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stdout)
            .with_ansi(std::io::stdout().is_terminal())
            .with_target(false)
            .init();

        tracing::debug!("log level: {}", log_level);
    });
}

fn env_filter_and_log_level() -> (EnvFilter, String) {
    // RUST_LOG still applies to dependencies and can override this crate.
    let directive_string = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(&directive_string);

    let log_level = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "info".to_string());

    if !directive_string.contains(&format!("{CRATE_NAME}=")) {
        match format!("{CRATE_NAME}={log_level}").parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(err) => eprintln!("ignoring invalid {LOG_ENV_VAR}={log_level}: {err}"),
        }
    }

    (env_filter, log_level)
}
