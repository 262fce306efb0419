// src/report.rs
// =============================================================================
// What the user sees in the terminal:
// - a progress bar, one tick per root domain (success, failure or timeout)
// - a summary once the run is over, as a table or as JSON
//
// Per-page details live in the log files, not here.
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::{DomainStatus, RunReport};

/// Progress bar sized to the number of root domains
pub fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    // Template is a constant; fall back to the default style if it is rejected
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} domains ({elapsed})")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// Prints the report either as a table or JSON
pub fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(report: &RunReport) {
    println!("{:<50} {:<15} {:>8} {:>8}", "ROOT DOMAIN", "STATUS", "PAGES", "ERRORS");
    println!("{}", "=".repeat(84));

    for domain in &report.domains {
        // Truncate long roots so the columns stay aligned
        let root_display = if domain.root.chars().count() > 47 {
            format!("{}...", domain.root.chars().take(47).collect::<String>())
        } else {
            domain.root.clone()
        };

        println!(
            "{:<50} {:<15} {:>8} {:>8}",
            root_display,
            format_status(&domain.status),
            domain.pages,
            domain.errors
        );
    }

    println!();

    let completed = report.count(|s| matches!(s, DomainStatus::Completed));
    let timed_out = report.count(|s| matches!(s, DomainStatus::TimedOut));
    let failed = report.count(|s| matches!(s, DomainStatus::Failed { .. }));

    println!("📊 Summary:");
    println!("   ✅ Completed: {}", completed);
    println!("   ⏱️  Timed out: {}", timed_out);
    println!("   ❌ Failed: {}", failed);
    println!("   📋 Pages found: {}", report.total_pages());
}

fn format_status(status: &DomainStatus) -> String {
    match status {
        DomainStatus::Completed => "✅ COMPLETED".to_string(),
        DomainStatus::TimedOut => "⏱️  TIMEOUT".to_string(),
        DomainStatus::Failed { .. } => "❌ FAILED".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::DomainReport;

    fn report() -> RunReport {
        RunReport {
            domains: vec![
                DomainReport {
                    root: "http://a.test".to_string(),
                    status: DomainStatus::Completed,
                    pages: 5,
                    errors: 1,
                },
                DomainReport {
                    root: "http://b.test".to_string(),
                    status: DomainStatus::TimedOut,
                    pages: 2,
                    errors: 0,
                },
                DomainReport {
                    root: "nope".to_string(),
                    status: DomainStatus::Failed {
                        reason: "invalid root domain".to_string(),
                    },
                    pages: 0,
                    errors: 0,
                },
            ],
        }
    }

    #[test]
    fn test_report_totals() {
        let report = report();
        assert_eq!(report.total_pages(), 7);
        assert_eq!(report.count(|s| matches!(s, DomainStatus::TimedOut)), 1);
        assert_eq!(report.count(|s| matches!(s, DomainStatus::Failed { .. })), 1);
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(&DomainStatus::TimedOut), "⏱️  TIMEOUT");
        assert_eq!(
            format_status(&DomainStatus::Failed {
                reason: String::new()
            }),
            "❌ FAILED"
        );
    }

    #[test]
    fn test_print_report_json_and_table() {
        assert!(print_report(&report(), true).is_ok());
        assert!(print_report(&report(), false).is_ok());
    }
}
