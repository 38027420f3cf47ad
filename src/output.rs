//! CLI output formatting.
//!
//! Format functions are pure — no I/O — so summaries can be unit tested;
//! the `print_*` wrappers write to stdout. Errors are printed by their
//! sources and go to stderr.

use crate::convert::ConvertSummary;
use std::path::Path;

/// One line per converted input file:
///
/// ```text
/// archive.xml → 3 pages (5 of 7 entries, 2 filtered)
/// ```
pub fn format_file_summary(input: &Path, summary: &ConvertSummary) -> String {
    let mut details = format!(
        "{} of {} {}",
        summary.entries_written,
        summary.entries_seen,
        plural(summary.entries_seen, "entry", "entries"),
    );
    if summary.entries_filtered > 0 {
        details.push_str(&format!(", {} filtered", summary.entries_filtered));
    }
    if summary.entries_dropped > 0 {
        details.push_str(&format!(", {} dropped", summary.entries_dropped));
    }
    format!(
        "{} → {} {} ({})",
        input.display(),
        summary.pages,
        plural(summary.pages, "page", "pages"),
        details,
    )
}

pub fn print_file_summary(input: &Path, summary: &ConvertSummary) {
    println!("{}", format_file_summary(input, summary));
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
