use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use resolv_conf::ScopedIp;

use crate::error::SourceError;

/// Newline-delimited list of public resolvers
pub const PUBLIC_LIST_URL: &str = "https://public-dns.info/nameservers.txt";
pub const LOCAL_CONFIG_PATH: &str = "/etc/resolv.conf";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ordered list of nameserver addresses to probe.
///
/// Sources are appended in priority order, then `dedup` and `truncate`
/// produce the final target list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nameservers {
	servers: Vec<String>,
}

impl Nameservers {
	pub fn new() -> Self {
		Nameservers::default()
	}

	/// Append addresses as given, without validation.
	pub fn add<I, S>(&mut self, servers: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.servers.extend(servers.into_iter().map(Into::into));
	}

	/// Append the nameservers listed in a resolv.conf file.
	///
	/// Returns the number of servers added.
	pub fn extend_from_local(&mut self, path: &Path) -> Result<usize, SourceError> {
		let content = std::fs::read(path).map_err(|e| SourceError::Read {
			path: path.display().to_string(),
			source: e,
		})?;
		let servers = parse_resolv_conf(&content).map_err(|why| SourceError::Parse {
			path: path.display().to_string(),
			why,
		})?;
		let count = servers.len();
		self.add(servers);
		Ok(count)
	}

	/// Download a public nameserver list and append its IPv4 entries.
	///
	/// Returns the number of servers added.
	pub async fn extend_from_public(&mut self, url: &str) -> Result<usize, SourceError> {
		let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
		let res = client.get(url).send().await?;
		if !res.status().is_success() {
			return Err(SourceError::Status(res.status()));
		}
		let body = res.text().await?;

		let servers = parse_public_list(&body);
		let count = servers.len();
		self.add(servers);
		Ok(count)
	}

	/// Drop repeated addresses, keeping the first occurrence of each.
	pub fn dedup(&mut self) {
		let mut seen = HashSet::new();
		self.servers.retain(|s| seen.insert(s.clone()));
	}

	/// Keep only the first `n` servers; 0 keeps all of them.
	pub fn truncate(&mut self, n: usize) {
		if n > 0 {
			self.servers.truncate(n);
		}
	}

	pub fn len(&self) -> usize {
		self.servers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.servers.is_empty()
	}

	pub fn as_slice(&self) -> &[String] {
		&self.servers
	}
}

/// Return the built-in nameservers that are always probed first.
pub fn default_nameservers() -> Vec<&'static str> {
	vec![
		// Cloudflare
		"1.1.1.1",
		"1.0.0.1",
		// Google
		"8.8.8.8",
		"8.8.4.4",
	]
}

/// Extract the IPv4 addresses from a newline-delimited server list.
///
/// IPv4-mapped IPv6 entries are converted; anything else is skipped.
pub fn parse_public_list(body: &str) -> Vec<String> {
	body.lines()
		.filter_map(|line| line.trim().parse::<IpAddr>().ok())
		.filter_map(|ip| match ip {
			IpAddr::V4(v4) => Some(v4),
			IpAddr::V6(v6) => v6.to_ipv4_mapped(),
		})
		.map(|v4| v4.to_string())
		.collect()
}

/// Extract the `nameserver` entries from resolv.conf content.
pub fn parse_resolv_conf(content: &[u8]) -> Result<Vec<String>, String> {
	let config = resolv_conf::Config::parse(content).map_err(|e| e.to_string())?;
	let servers = config
		.nameservers
		.iter()
		.map(|ns| match ns {
			ScopedIp::V4(ip) => ip.to_string(),
			// Scope ids cannot be carried through to a socket address
			ScopedIp::V6(ip, _) => ip.to_string(),
		})
		.collect();
	Ok(servers)
}
