//! Statistics reporting.

use console::style;

use crate::download::{Outcome, RunSummary};

/// Human-readable byte count.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Print statistics for a finished run.
pub fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Downloaded: {}", style(summary.downloaded_count).green());
    println!("  Skipped:    {} (already present)", summary.skipped_count);
    if summary.failed_count > 0 {
        println!("  Failed:     {}", style(summary.failed_count).red());
    } else {
        println!("  Failed:     0");
    }
    println!("  Transferred: {}", format_bytes(summary.bytes_downloaded));
    println!("{}", style("═".repeat(50)).dim());

    let failures: Vec<_> = summary
        .reports
        .iter()
        .filter_map(|r| match &r.outcome {
            Outcome::Failed(e) => Some((r.unique_id.as_str(), e)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!("{}", style("Failed recordings:").bold());
        for (id, error) in failures {
            println!("  {} {}: {}", style("✗").red(), id, error);
        }
    }
}
