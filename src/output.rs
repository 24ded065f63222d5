use comfy_table::{presets::UTF8_FULL, CellAlignment, ContentArrangement, Table};

use crate::stats::Stats;
use crate::transport::ProbeConfig;

/// Failed-response rate, in percent, above which the run counts as failed
pub const FAILED_RESPONSE_THRESHOLD: f64 = 10.0;

/// Print what is about to be probed.
pub fn print_probe_header(config: &ProbeConfig, server_count: usize) {
	println!("DNS Probe");
	println!("=========");
	println!("Name:           {}", config.query.name);
	println!("Type:           {}", config.query.record_type);
	println!("Nameservers:    {}", server_count);
	println!("Timeout:        {} ms", config.timeout.as_millis());
	println!();
}

fn rate_cell(rate: Option<f64>) -> String {
	match rate {
		Some(r) => format!("{:.0}%", r),
		None => "n/a".to_string(),
	}
}

/// Build the summary table of derived failure rates.
pub fn summary_table(stats: &Stats) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(vec!["Metric", "Rate", "Count"]);

	let noerror = stats.responses() - stats.server_failures;
	let rows = [
		(
			"Failed nameservers",
			stats.failed_servers_percentage(),
			stats.unreachable,
			stats.total_servers,
		),
		(
			"Failed responses",
			stats.failed_responses_percentage(),
			stats.failed_responses(),
			stats.responses(),
		),
		(
			"Server failures",
			stats.server_failures_percentage(),
			stats.server_failures,
			stats.responses(),
		),
		(
			"Empty responses",
			stats.empty_responses_percentage(),
			stats.empty,
			noerror,
		),
	];
	for (label, rate, part, whole) in rows {
		table.add_row(vec![
			label.to_string(),
			rate_cell(rate),
			format!("{}/{}", part, whole),
		]);
	}

	for column in table.column_iter_mut().skip(1) {
		column.set_cell_alignment(CellAlignment::Right);
	}
	table
}

/// Print the summary table. Always printed, even when every server failed.
pub fn print_summary(stats: &Stats) {
	println!("\nSummary");
	println!("=======\n");
	println!("{}", summary_table(stats));
}

/// Whether the failed-response rate is above `FAILED_RESPONSE_THRESHOLD`.
///
/// An undefined rate (no responses at all) never exceeds the threshold.
pub fn threshold_exceeded(stats: &Stats) -> bool {
	stats.failed_responses_percentage().unwrap_or(0.0) > FAILED_RESPONSE_THRESHOLD
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::Outcome;

	fn stats_with(answered: usize, empty: usize, server_failures: usize, unreachable: usize) -> Stats {
		let mut stats = Stats::with_total(answered + empty + server_failures + unreachable);
		for _ in 0..answered {
			stats.record(Outcome::Answered);
		}
		for _ in 0..empty {
			stats.record(Outcome::Empty);
		}
		for _ in 0..server_failures {
			stats.record(Outcome::ServerFailure);
		}
		for _ in 0..unreachable {
			stats.record(Outcome::Unreachable);
		}
		stats
	}

	#[test]
	fn test_threshold_boundary() {
		// Exactly 10% does not breach
		assert!(!threshold_exceeded(&stats_with(9, 0, 1, 0)));
		// 2 of 11 is just above
		assert!(threshold_exceeded(&stats_with(9, 1, 1, 0)));
	}

	#[test]
	fn test_unreachable_servers_do_not_breach() {
		// Only responses count toward the failed-response rate
		assert!(!threshold_exceeded(&stats_with(10, 0, 0, 90)));
	}

	#[test]
	fn test_threshold_with_no_responses() {
		assert!(!threshold_exceeded(&stats_with(0, 0, 0, 5)));
		assert!(!threshold_exceeded(&Stats::default()));
	}

	#[test]
	fn test_summary_table_rows() {
		let rendered = summary_table(&stats_with(1, 1, 0, 1)).to_string();
		assert!(rendered.contains("Failed nameservers"));
		assert!(rendered.contains("33%"));
		assert!(rendered.contains("1/3"));
		assert!(rendered.contains("50%"));
		assert!(rendered.contains("1/2"));
	}

	#[test]
	fn test_summary_table_with_nothing_probed() {
		let rendered = summary_table(&Stats::default()).to_string();
		assert!(rendered.contains("n/a"));
		assert!(rendered.contains("0/0"));
		assert!(rendered.contains("Empty responses"));
	}
}
