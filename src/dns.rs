use std::net::SocketAddr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::ProtoError;
use tokio::net::UdpSocket;

use crate::error::TransportError;

/// DNS response information extracted from a parsed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
	pub rcode: ResponseCode,
	pub answer_count: usize,
}

/// Sends one query to one nameserver.
///
/// Implementations must not retry: a single attempt either yields a
/// response or a transport error.
#[async_trait]
pub trait Resolver: Send + Sync {
	async fn query(
		&self,
		name: &Name,
		record_type: RecordType,
		server: SocketAddr,
	) -> Result<DnsResponse, TransportError>;
}

/// Parse a domain name given on the command line into an absolute name.
pub fn parse_name(fqdn: &str) -> Result<Name, ProtoError> {
	let mut name = Name::from_ascii(fqdn)?;
	name.set_fqdn(true);
	Ok(name)
}

/// Build a DNS query message with recursion desired.
///
/// Returns the serialized query bytes ready to send over UDP.
pub fn build_query(
	name: &Name,
	record_type: RecordType,
	txid: u16,
) -> Result<Vec<u8>, ProtoError> {
	let mut message = Message::new();
	message.set_id(txid);
	message.set_recursion_desired(true);
	message.add_query(Query::query(name.clone(), record_type));
	message.to_vec()
}

/// Parse a DNS response and validate its transaction ID.
///
/// Returns None if the bytes are not a response to the query with `expected_txid`.
pub fn parse_response(bytes: &[u8], expected_txid: u16) -> Option<DnsResponse> {
	let message = Message::from_vec(bytes).ok()?;
	if message.id() != expected_txid || message.message_type() != MessageType::Response {
		return None;
	}
	Some(DnsResponse {
		rcode: message.response_code(),
		answer_count: message.answers().len(),
	})
}

/// Plain DNS over UDP with a per-query deadline
#[derive(Debug, Clone)]
pub struct UdpResolver {
	timeout: Duration,
}

impl UdpResolver {
	pub fn new(timeout: Duration) -> Self {
		UdpResolver { timeout }
	}
}

#[async_trait]
impl Resolver for UdpResolver {
	/// Uses a dedicated socket per query so concurrent queries never see
	/// each other's responses.
	async fn query(
		&self,
		name: &Name,
		record_type: RecordType,
		server: SocketAddr,
	) -> Result<DnsResponse, TransportError> {
		let txid: u16 = rand::random();
		let query_bytes = build_query(name, record_type, txid)?;

		let bind_addr = if server.is_ipv4() {
			"0.0.0.0:0"
		} else {
			"[::]:0"
		};
		let socket = UdpSocket::bind(bind_addr).await.map_err(TransportError::Bind)?;

		let start = Instant::now();
		socket
			.send_to(&query_bytes, server)
			.await
			.map_err(TransportError::Send)?;

		// Stray or garbled datagrams are skipped until the deadline; the
		// query itself is sent only once.
		let mut buf = vec![0u8; 4096];
		loop {
			let remaining = self.timeout.saturating_sub(start.elapsed());
			if remaining.is_zero() {
				return Err(TransportError::Timeout(self.timeout));
			}

			match tokio::time::timeout(remaining, socket.recv_from(&mut buf)).await {
				Ok(Ok((len, src))) => {
					if src.ip() != server.ip() {
						continue;
					}
					if let Some(response) = parse_response(&buf[..len], txid) {
						return Ok(response);
					}
				}
				Ok(Err(e)) => return Err(TransportError::Recv(e)),
				Err(_) => return Err(TransportError::Timeout(self.timeout)),
			}
		}
	}
}
