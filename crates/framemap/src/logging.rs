use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Initialize stderr logging for the CLI.
///
/// The publish path only emits `debug`, `info`, and `warn`, so the CLI
/// exposes a single verbosity switch rather than a level ladder. The
/// `FRAMEMAP_LOG` environment variable takes precedence and accepts
/// per-crate filters, e.g. `FRAMEMAP_LOG=framemap_store=debug` to watch the
/// backing-file writes alone.
pub fn init_logging(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_env("FRAMEMAP_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
