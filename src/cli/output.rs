//! Output formatting for the member diff.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::planner::{DiffAction, DiffReport};
use crate::syncer::SyncOutcome;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Diff row for table display.
#[derive(Tabled)]
struct DiffTableRow {
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Hostname (if known)")]
    hostname: String,
}

/// Diff as emitted for `--output json`.
#[derive(Serialize)]
struct DiffJson<'a> {
    group_id: &'a str,
    changes: usize,
    added: usize,
    removed: usize,
    rows: &'a [crate::planner::DiffRow],
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the configured format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Formats a member diff for display.
    #[must_use]
    pub fn format_diff(&self, group_id: &str, diff: &DiffReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&DiffJson {
                group_id,
                changes: diff.changes,
                added: diff.count(DiffAction::Add),
                removed: diff.count(DiffAction::Remove),
                rows: &diff.rows,
            })
            .unwrap_or_default(),
            OutputFormat::Text => Self::diff_table(diff),
        }
    }

    /// Renders the diff rows as an ASCII table.
    #[must_use]
    pub fn diff_table(diff: &DiffReport) -> String {
        let rows = diff.rows.iter().map(|row| DiffTableRow {
            action: row.action.to_string(),
            ip: row.ip.clone(),
            hostname: row.hostname.clone().unwrap_or_default(),
        });

        Table::new(rows)
            .with(Style::ascii())
            .modify(Columns::single(0), Alignment::center())
            .modify(Columns::new(1..), Alignment::left())
            .to_string()
    }

    /// Formats the final outcome of a run.
    #[must_use]
    pub fn format_outcome(outcome: &SyncOutcome) -> String {
        match outcome {
            SyncOutcome::Unchanged => {
                format!("{} No changes found, update skipped", "✓".green())
            }
            SyncOutcome::DryRun { changes } => {
                format!("{} Dry run: {changes} changes not applied", "•".yellow())
            }
            SyncOutcome::Declined { changes } => {
                format!("{} Update canceled by user ({changes} changes discarded)", "✗".yellow())
            }
            SyncOutcome::Applied { changes } => {
                format!("{} Controller update complete ({changes} changes)", "✓".green())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::DiffRow;

    fn report() -> DiffReport {
        DiffReport {
            rows: vec![
                DiffRow {
                    action: DiffAction::Keep,
                    ip: String::from("10.0.0.1"),
                    hostname: Some(String::from("b.example.com")),
                },
                DiffRow {
                    action: DiffAction::Remove,
                    ip: String::from("10.0.0.9"),
                    hostname: None,
                },
                DiffRow {
                    action: DiffAction::Add,
                    ip: String::from("10.0.0.5"),
                    hostname: Some(String::from("a.example.com")),
                },
            ],
            changes: 2,
        }
    }

    #[test]
    fn test_text_table_has_headers_and_rows() {
        let table = OutputFormatter::new(OutputFormat::Text).format_diff("60aa", &report());

        assert!(table.contains("Action"));
        assert!(table.contains("IP Address"));
        assert!(table.contains("Hostname (if known)"));
        assert!(table.contains("Remove"));
        assert!(table.contains("a.example.com"));
        assert!(table.find("10.0.0.9").unwrap() < table.find("10.0.0.5").unwrap());
    }

    #[test]
    fn test_json_output() {
        let json = OutputFormatter::new(OutputFormat::Json).format_diff("60aa", &report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["group_id"], "60aa");
        assert_eq!(value["changes"], 2);
        assert_eq!(value["added"], 1);
        assert_eq!(value["removed"], 1);
        assert_eq!(value["rows"][1]["action"], "Remove");
        assert!(value["rows"][1]["hostname"].is_null());
    }

    #[test]
    fn test_outcome_messages() {
        colored::control::set_override(false);
        assert_eq!(
            OutputFormatter::format_outcome(&SyncOutcome::Unchanged),
            "✓ No changes found, update skipped"
        );
        assert!(
            OutputFormatter::format_outcome(&SyncOutcome::Applied { changes: 2 })
                .contains("2 changes")
        );
    }
}
