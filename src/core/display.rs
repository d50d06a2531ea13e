//! Display utilities for CLI output formatting.
//!
//! Renders the per-directory approval statuses as a terminal table for the
//! text output mode of `evaluate`.

use tabled::{Table, Tabled};

use super::resolver::ApprovalResolver;
use super::types::DirectoryStatus;

#[derive(Tabled)]
struct DirectoryRow {
    #[tabled(rename = "Ownership File")]
    path: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Approved By")]
    approvers: String,
}

/// Formats the directory statuses of an evaluation as a table string.
pub(crate) fn status_table(resolver: &ApprovalResolver) -> String {
    let rows: Vec<DirectoryRow> = resolver
        .directory_statuses()
        .iter()
        .map(|status| DirectoryRow {
            path: resolver.view().owners_file_path(status.directory()),
            status: match status {
                DirectoryStatus::Approved { .. } => "approved".to_string(),
                DirectoryStatus::Unapproved { .. } => "needs approval".to_string(),
            },
            approvers: match status {
                DirectoryStatus::Approved { approvers, .. } => join_limited(approvers, 3),
                DirectoryStatus::Unapproved { .. } => "-".to_string(),
            },
        })
        .collect();

    // Get terminal width, fallback to 80 if unavailable
    let terminal_width = if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size()
    {
        w as usize
    } else {
        80
    };

    let mut table = Table::new(rows);
    table
        .with(tabled::settings::Style::modern())
        .with(tabled::settings::Width::wrap(
            terminal_width.saturating_sub(4),
        ))
        .with(tabled::settings::Padding::new(1, 1, 0, 0));

    table.to_string()
}

/// Joins up to `limit` items with ", ", appending a `(+N)` marker for the rest.
pub(crate) fn join_limited(items: &[String], limit: usize) -> String {
    let shown: Vec<&str> = items.iter().take(limit).map(String::as_str).collect();
    let mut display = shown.join(", ");
    if items.len() > limit {
        display.push_str(&format!(" (+{})", items.len() - limit));
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_join_limited_no_marker_needed() {
        assert_eq!(join_limited(&strings(&["Alice"]), 3), "Alice");
        assert_eq!(
            join_limited(&strings(&["Alice", "Bob", "Carol"]), 3),
            "Alice, Bob, Carol"
        );
        assert_eq!(join_limited(&[], 3), "");
    }

    #[test]
    fn test_join_limited_with_marker() {
        assert_eq!(
            join_limited(&strings(&["Alice", "Bob", "Carol", "Dan"]), 3),
            "Alice, Bob, Carol (+1)"
        );
        assert_eq!(
            join_limited(&strings(&["Alice", "Bob", "Carol", "Dan", "Eve"]), 2),
            "Alice, Bob (+3)"
        );
    }
}
