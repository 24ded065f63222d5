use std::path::PathBuf;
use std::time::Duration;

use hickory_proto::rr::{Name, RecordType};

/// The single question asked of every nameserver
#[derive(Debug, Clone)]
pub struct ProbeQuery {
	pub name: Name,
	pub record_type: RecordType,
}

/// Classified result of one lookup against one nameserver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// No response arrived (transport error or timeout)
	Unreachable,
	/// A response arrived with a non-NOERROR rcode
	ServerFailure,
	/// NOERROR with an empty answer section
	Empty,
	/// NOERROR with at least one answer record
	Answered,
}

/// Probe configuration resolved from the command line
#[derive(Debug, Clone)]
pub struct ProbeConfig {
	pub query: ProbeQuery,
	pub timeout: Duration,
	/// Probe only the first `limit` nameservers; 0 means all
	pub limit: usize,
	pub use_defaults: bool,
	pub resolv_conf: Option<PathBuf>,
	pub public_list: Option<String>,
}
