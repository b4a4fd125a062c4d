use habitual_core::Config;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` means `debug` and the
/// configured `logging.level` applies.
pub fn init(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.is_empty() => EnvFilter::new(filter),
        _ if verbose => EnvFilter::new("debug"),
        _ => EnvFilter::new(configured_level()),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn configured_level() -> String {
    // A broken config file is reported by the command that loads it.
    Config::load()
        .map(|cfg| cfg.logging.level)
        .unwrap_or_else(|_| "warn".into())
}
