use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use hickory_proto::rr::RecordType;

use crate::nameservers::{LOCAL_CONFIG_PATH, PUBLIC_LIST_URL};

/// Probe many DNS nameservers with a single query
#[derive(Parser, Debug)]
#[command(name = "nsprobe")]
#[command(about = "Query one name against many nameservers and report failure rates")]
pub struct Cli {
	/// Fully-qualified domain name to look up
	pub fqdn: String,

	/// DNS record type to query
	#[arg(short = 't', long = "type", default_value = "A", value_parser = parse_record_type)]
	pub record_type: RecordType,

	/// Look up only against the first N nameservers (0 = all)
	#[arg(short = 'n', long = "limit", default_value = "0")]
	pub limit: usize,

	/// Query timeout in milliseconds
	#[arg(long = "timeout", default_value = "2000", value_parser = clap::value_parser!(u64).range(1..))]
	pub timeout: u64,

	/// Local resolver configuration to read nameservers from
	#[arg(long = "resolv-conf", default_value = LOCAL_CONFIG_PATH)]
	pub resolv_conf: PathBuf,

	/// URL of a newline-delimited public nameserver list
	#[arg(long = "public-list", default_value = PUBLIC_LIST_URL)]
	pub public_list: String,

	/// Skip the built-in nameservers
	#[arg(long = "no-defaults")]
	pub no_defaults: bool,

	/// Skip nameservers from the local resolver configuration
	#[arg(long = "no-local")]
	pub no_local: bool,

	/// Skip the public nameserver list
	#[arg(long = "no-public")]
	pub no_public: bool,

	/// Increase log verbosity (repeatable)
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
	pub verbose: u8,
}

/// Parse a record type name case-insensitively, e.g. "aaaa" or "MX".
pub fn parse_record_type(input: &str) -> Result<RecordType, String> {
	let upper = input.trim().to_ascii_uppercase();
	match RecordType::from_str(&upper) {
		Ok(RecordType::Unknown(_)) | Err(_) => Err(format!("unsupported DNS type: {}", upper)),
		Ok(record_type) => Ok(record_type),
	}
}
