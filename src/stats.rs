use crate::transport::Outcome;

/// Outcome counters for one probe run.
///
/// Each worker owns its own `Stats` and the scheduler merges them after
/// every worker has been joined, so no counter is ever shared between tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
	pub total_servers: usize,
	pub unreachable: usize,
	pub server_failures: usize,
	pub empty: usize,
	pub answered: usize,
}

/// Compute `part / whole` as a percentage, or None for an empty denominator.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
	if whole == 0 {
		return None;
	}
	Some(part as f64 / whole as f64 * 100.0)
}

impl Stats {
	pub fn with_total(total_servers: usize) -> Self {
		Stats {
			total_servers,
			..Stats::default()
		}
	}

	/// Count one classified lookup.
	pub fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::Unreachable => self.unreachable += 1,
			Outcome::ServerFailure => self.server_failures += 1,
			Outcome::Empty => self.empty += 1,
			Outcome::Answered => self.answered += 1,
		}
	}

	/// Add another accumulator's outcome counts. `total_servers` is left alone.
	pub fn merge(&mut self, other: &Stats) {
		self.unreachable += other.unreachable;
		self.server_failures += other.server_failures;
		self.empty += other.empty;
		self.answered += other.answered;
	}

	/// Number of lookups classified so far
	pub fn completed(&self) -> usize {
		self.unreachable + self.responses()
	}

	/// Servers that answered at all, whatever the rcode
	pub fn responses(&self) -> usize {
		self.server_failures + self.empty + self.answered
	}

	/// Responses that did not produce an answer for the name
	pub fn failed_responses(&self) -> usize {
		self.server_failures + self.empty
	}

	pub fn failed_servers_percentage(&self) -> Option<f64> {
		percentage(self.unreachable, self.total_servers)
	}

	pub fn failed_responses_percentage(&self) -> Option<f64> {
		percentage(self.failed_responses(), self.responses())
	}

	pub fn server_failures_percentage(&self) -> Option<f64> {
		percentage(self.server_failures, self.responses())
	}

	/// Share of NOERROR responses that carried no records
	pub fn empty_responses_percentage(&self) -> Option<f64> {
		percentage(self.empty, self.responses() - self.server_failures)
	}
}
