//! CLI output formatting.
//!
//! Each kind of diagnostic has a `format_*` function (pure, returns a
//! string) and a `print_*` wrapper that writes it. Format functions carry
//! no I/O so tests can assert on exact lines.
//!
//! Build progress goes to stdout; per-file derivation warnings go to stderr
//! so a piped build log stays clean.

use crate::pipeline::DeriveWarning;
use crate::site::BuildSummary;

/// A phase header, e.g. `  Processing photos...`.
pub fn format_phase(label: &str) -> String {
    format!("  {label}...")
}

pub fn print_phase(label: &str) {
    println!("{}", format_phase(label));
}

/// A per-file derivation warning naming the file and the underlying error.
pub fn format_derive_warning(warning: &DeriveWarning) -> String {
    format!("  Warning: {}", warning.message_line())
}

pub fn print_derive_warnings(warnings: &[DeriveWarning]) {
    for warning in warnings {
        eprintln!("{}", format_derive_warning(warning));
    }
}

/// The closing summary line for a completed build.
pub fn format_summary(summary: &BuildSummary) -> String {
    let mut line = format!(
        "Done: {} pages, {} photos, {} images",
        summary.pages, summary.photos, summary.images
    );
    if summary.warnings > 0 {
        line.push_str(&format!(" ({} warnings)", summary.warnings));
    }
    line
}

pub fn print_summary(summary: &BuildSummary) {
    println!("{}", format_summary(summary));
}
