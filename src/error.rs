use std::io;
use std::time::Duration;

use hickory_proto::ProtoError;
use thiserror::Error;

/// Failure to gather nameservers from one source.
///
/// These never abort a run; the set just ends up smaller.
#[derive(Debug, Error)]
pub enum SourceError {
	#[error("failed to read '{path}': {source}")]
	Read {
		path: String,
		#[source]
		source: io::Error,
	},

	#[error("failed to parse '{path}': {why}")]
	Parse { path: String, why: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("unexpected HTTP status: {0}")]
	Status(reqwest::StatusCode),
}

/// Failure to get any usable response from a nameserver
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("failed to bind socket: {0}")]
	Bind(#[source] io::Error),

	#[error("failed to send query: {0}")]
	Send(#[source] io::Error),

	#[error("failed to receive response: {0}")]
	Recv(#[source] io::Error),

	#[error("no response within {} ms", .0.as_millis())]
	Timeout(Duration),

	#[error("failed to encode query: {0}")]
	Encode(#[from] ProtoError),
}
