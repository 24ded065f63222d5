mod cli;
mod dns;
mod error;
mod fanout;
mod logging;
mod lookup;
mod nameservers;
mod output;
mod stats;
mod transport;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::dns::UdpResolver;
use crate::nameservers::Nameservers;
use crate::transport::{ProbeConfig, ProbeQuery};

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();

	match run(cli).await {
		Ok(code) => code,
		Err(e) => {
			eprintln!("nsprobe: {:#}", e);
			ExitCode::from(2)
		}
	}
}

/// Build the probe configuration from the command line.
///
/// Fails on input that makes probing pointless, before any network activity.
fn build_config(cli: &Cli) -> Result<ProbeConfig> {
	let name = dns::parse_name(&cli.fqdn)
		.map_err(|e| anyhow!("invalid domain name '{}': {}", cli.fqdn, e))?;

	Ok(ProbeConfig {
		query: ProbeQuery {
			name,
			record_type: cli.record_type,
		},
		timeout: Duration::from_millis(cli.timeout),
		limit: cli.limit,
		use_defaults: !cli.no_defaults,
		resolv_conf: (!cli.no_local).then(|| cli.resolv_conf.clone()),
		public_list: (!cli.no_public).then(|| cli.public_list.clone()),
	})
}

/// Gather nameservers from every enabled source, in priority order.
///
/// Source failures are logged and skipped.
async fn collect_nameservers(config: &ProbeConfig) -> Nameservers {
	let mut servers = Nameservers::new();

	if config.use_defaults {
		servers.add(nameservers::default_nameservers());
	}

	if let Some(path) = &config.resolv_conf {
		match servers.extend_from_local(path) {
			Ok(count) => info!("{} nameservers from {}", count, path.display()),
			Err(e) => warn!("getting local nameservers: {}", e),
		}
	}

	if let Some(url) = &config.public_list {
		match servers.extend_from_public(url).await {
			Ok(count) => info!("{} nameservers from {}", count, url),
			Err(e) => warn!("getting public nameservers: {}", e),
		}
	}

	servers.dedup();
	servers.truncate(config.limit);
	if servers.is_empty() {
		warn!("no nameservers to probe");
	}
	servers
}

async fn run(cli: Cli) -> Result<ExitCode> {
	logging::init(cli.verbose)?;
	let config = build_config(&cli)?;

	let servers = collect_nameservers(&config).await;
	output::print_probe_header(&config, servers.len());

	let resolver = Arc::new(UdpResolver::new(config.timeout));
	let stats = fanout::run(resolver, config.query.clone(), servers.as_slice()).await;

	output::print_summary(&stats);

	if output::threshold_exceeded(&stats) {
		Ok(ExitCode::FAILURE)
	} else {
		Ok(ExitCode::SUCCESS)
	}
}
