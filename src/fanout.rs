use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::dns::Resolver;
use crate::lookup::lookup;
use crate::stats::Stats;
use crate::transport::ProbeQuery;

/// Number of worker tasks, and therefore the maximum number of queries in flight
pub const POOL_SIZE: usize = 100;

/// Probe every nameserver once using a pool of `POOL_SIZE` workers.
pub async fn run(
	resolver: Arc<dyn Resolver>,
	query: ProbeQuery,
	nameservers: &[String],
) -> Stats {
	run_with_pool(resolver, query, nameservers, POOL_SIZE).await
}

/// Probe every nameserver once with at most `pool_size` queries in flight.
///
/// Workers pull servers from a shared queue that a feeder task fills and
/// then closes. Each worker counts its own outcomes; the counts are merged
/// only after every worker has been joined, so the returned `Stats` always
/// covers every server.
pub async fn run_with_pool(
	resolver: Arc<dyn Resolver>,
	query: ProbeQuery,
	nameservers: &[String],
	pool_size: usize,
) -> Stats {
	let mut stats = Stats::with_total(nameservers.len());
	if nameservers.is_empty() || pool_size == 0 {
		debug!("no nameservers to probe");
		return stats;
	}

	let (tx, rx) = mpsc::channel::<String>(pool_size);
	let rx = Arc::new(Mutex::new(rx));
	let query = Arc::new(query);

	let worker_count = pool_size.min(nameservers.len());
	debug!(workers = worker_count, servers = nameservers.len(), "starting workers");

	let mut workers = JoinSet::new();
	for _ in 0..worker_count {
		let rx = Arc::clone(&rx);
		let resolver = Arc::clone(&resolver);
		let query = Arc::clone(&query);

		workers.spawn(async move {
			let mut local = Stats::default();
			loop {
				// The guard is released before the lookup starts
				let next = rx.lock().await.recv().await;
				let Some(server) = next else {
					break;
				};
				let outcome = lookup(resolver.as_ref(), &query, &server).await;
				local.record(outcome);
			}
			local
		});
	}

	let servers = nameservers.to_vec();
	let feeder = tokio::spawn(async move {
		for server in servers {
			if tx.send(server).await.is_err() {
				break;
			}
		}
		// Dropping the sender closes the queue
	});

	if let Err(e) = feeder.await {
		warn!("feeder task failed: {}", e);
	}
	debug!("queue closed, draining");

	while let Some(joined) = workers.join_next().await {
		match joined {
			Ok(local) => stats.merge(&local),
			Err(e) => warn!("worker task failed: {}", e),
		}
	}
	debug!(completed = stats.completed(), "all workers joined");

	stats
}
