use anyhow::{anyhow, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn log_level(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	}
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` overrides the level picked by `-v` when it is set.
pub fn init(verbosity: u8) -> Result<()> {
	let filter = if std::env::var_os("RUST_LOG").is_some() {
		EnvFilter::from_default_env()
	} else {
		EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), log_level(verbosity)))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init()
		.map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
