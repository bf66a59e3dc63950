// Colored stage summaries on stderr.
//
// stdout is reserved for the JSON result, so everything meant for the
// operator goes to stderr.

use colored::Colorize;

use crate::pipeline::run::RunReport;

/// Print the per-stage funnel of a finished discovery run.
pub fn display_run_summary(report: &RunReport) {
    let dead = report.discovered.saturating_sub(report.live);
    let spam = report.live.saturating_sub(report.accepted.len());

    eprintln!("\n{}", "=== Discovery Summary ===".bold());
    eprintln!("  {:<12} {:>5}", "Discovered".dimmed(), report.discovered);
    eprintln!("  {:<12} {:>5}", "Dead".dimmed(), format_dropped(dead));
    eprintln!("  {:<12} {:>5}", "Spam".dimmed(), format_dropped(spam));
    eprintln!(
        "  {:<12} {:>5}",
        "Accepted".dimmed(),
        report.accepted.len().to_string().green().bold()
    );
}

/// Print how many posts `collect` stored and where.
pub fn display_collect_summary(pages: usize, posts: usize, destination: &str) {
    eprintln!(
        "Collected {} posts from {} pages -> {}",
        posts.to_string().bold(),
        pages,
        destination
    );
}

fn format_dropped(count: usize) -> colored::ColoredString {
    if count > 0 {
        format!("-{count}").yellow()
    } else {
        "0".normal()
    }
}
