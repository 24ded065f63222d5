use std::net::{IpAddr, SocketAddr};

use hickory_proto::op::ResponseCode;
use tracing::debug;

use crate::dns::{DnsResponse, Resolver};
use crate::error::TransportError;
use crate::transport::{Outcome, ProbeQuery};

pub const DNS_PORT: u16 = 53;

/// Map the result of one query to exactly one outcome.
pub fn classify(result: &Result<DnsResponse, TransportError>) -> Outcome {
	match result {
		Err(_) => Outcome::Unreachable,
		Ok(response) if response.rcode != ResponseCode::NoError => Outcome::ServerFailure,
		Ok(response) if response.answer_count == 0 => Outcome::Empty,
		Ok(_) => Outcome::Answered,
	}
}

/// Query one nameserver once, print the result line and classify it.
pub async fn lookup(resolver: &dyn Resolver, query: &ProbeQuery, server: &str) -> Outcome {
	let addr = match server.parse::<IpAddr>() {
		Ok(ip) => SocketAddr::new(ip, DNS_PORT),
		Err(e) => {
			println!("querying {:<15} {}", server, e);
			return Outcome::Unreachable;
		}
	};

	let result = resolver.query(&query.name, query.record_type, addr).await;
	match &result {
		Ok(response) => println!("{}", response_line(server, response)),
		Err(e) => {
			debug!(server, error = %e, "query failed");
			println!("querying {:<15} {}", server, e);
		}
	}
	classify(&result)
}

fn response_line(server: &str, response: &DnsResponse) -> String {
	let unit = if response.answer_count == 1 { "RR" } else { "RRs" };
	format!(
		"querying {:<15} {} {} ({})",
		server, response.answer_count, unit, response.rcode,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	fn response(rcode: ResponseCode, answer_count: usize) -> Result<DnsResponse, TransportError> {
		Ok(DnsResponse { rcode, answer_count })
	}

	#[test]
	fn test_classify_transport_error() {
		let result = Err(TransportError::Timeout(Duration::from_secs(2)));
		assert_eq!(classify(&result), Outcome::Unreachable);
	}

	#[test]
	fn test_classify_refused_and_servfail() {
		assert_eq!(classify(&response(ResponseCode::Refused, 0)), Outcome::ServerFailure);
		assert_eq!(classify(&response(ResponseCode::ServFail, 0)), Outcome::ServerFailure);
		// An error rcode wins over any records that came with it
		assert_eq!(classify(&response(ResponseCode::NXDomain, 1)), Outcome::ServerFailure);
	}

	#[test]
	fn test_classify_noerror() {
		assert_eq!(classify(&response(ResponseCode::NoError, 0)), Outcome::Empty);
		assert_eq!(classify(&response(ResponseCode::NoError, 1)), Outcome::Answered);
		assert_eq!(classify(&response(ResponseCode::NoError, 5)), Outcome::Answered);
	}

	#[test]
	fn test_response_line_pluralization() {
		let one = DnsResponse { rcode: ResponseCode::NoError, answer_count: 1 };
		let none = DnsResponse { rcode: ResponseCode::NoError, answer_count: 0 };
		assert!(response_line("1.1.1.1", &one).contains(" 1 RR ("));
		assert!(response_line("1.1.1.1", &none).contains(" 0 RRs ("));
	}

	#[tokio::test]
	async fn test_lookup_invalid_address_is_unreachable() {
		struct Never;

		#[async_trait::async_trait]
		impl Resolver for Never {
			async fn query(
				&self,
				_name: &hickory_proto::rr::Name,
				_record_type: hickory_proto::rr::RecordType,
				_server: SocketAddr,
			) -> Result<DnsResponse, TransportError> {
				panic!("must not be queried");
			}
		}

		let query = ProbeQuery {
			name: crate::dns::parse_name("example.com").unwrap(),
			record_type: hickory_proto::rr::RecordType::A,
		};
		let outcome = lookup(&Never, &query, "not-an-ip").await;
		assert_eq!(outcome, Outcome::Unreachable);
	}
}
