//! Showing the member diff and asking for approval.
//!
//! The operator must see the table before answering the prompt. When the
//! installed log filter hides INFO, or the diff went to stdout as JSON, the
//! table is written to stderr right before the question.

use std::io::Write;
use tracing::{info, Level};

use crate::error::{ConfigError, Result};
use crate::planner::{DiffReport, SyncPlan};

use super::commands::OutputFormat;
use super::output::OutputFormatter;
use super::prompt::Prompter;

/// Prompt shown before the update is applied.
pub const APPLY_PROMPT: &str = "Apply changes to Unifi Controller?";

/// Presents a diff and collects the operator's approval.
pub struct DiffReview<'a> {
    formatter: &'a OutputFormatter,
    prompter: &'a dyn Prompter,
    /// Whether `info!` events reach the log output.
    info_visible: bool,
    dry_run: bool,
}

impl<'a> DiffReview<'a> {
    /// Creates a review using the log filter that is currently installed.
    #[must_use]
    pub fn new(formatter: &'a OutputFormatter, prompter: &'a dyn Prompter) -> Self {
        Self {
            formatter,
            prompter,
            info_visible: tracing::enabled!(Level::INFO),
            dry_run: false,
        }
    }

    /// Overrides whether `info!` output is visible.
    #[must_use]
    pub const fn with_info_visible(mut self, info_visible: bool) -> Self {
        self.info_visible = info_visible;
        self
    }

    /// Sets dry-run mode; the table is always shown since nothing is asked.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Emits the diff. Returns true if the operator has seen the table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `stdout` or `stderr` fails.
    pub fn show(
        &self,
        group_id: &str,
        diff: &DiffReport,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<bool> {
        let rendered = self.formatter.format_diff(group_id, diff);

        if self.formatter.format() == OutputFormat::Json {
            writeln!(stdout, "{rendered}")?;
            return Ok(false);
        }

        if self.info_visible {
            info!("Firewall group changes:\n{rendered}");
            return Ok(true);
        }

        if self.dry_run {
            writeln!(stderr, "{rendered}")?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Asks the operator to approve `plan`, printing the table first unless
    /// `table_shown`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] for `confirm` when no terminal is
    /// available, or an error if the prompt or the write fails.
    pub fn approve(
        &self,
        plan: &SyncPlan,
        table_shown: bool,
        stderr: &mut dyn Write,
    ) -> Result<bool> {
        if !self.prompter.is_interactive() {
            return Err(ConfigError::missing("confirm").into());
        }

        if !table_shown {
            writeln!(
                stderr,
                "Here is the list of {} firewall group changes to make:\n{}",
                plan.change_count(),
                OutputFormatter::diff_table(&plan.diff)
            )?;
        }

        self.prompter.confirm(APPLY_PROMPT, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FirewallGroup;
    use crate::error::SyncError;
    use crate::resolver::HostIpMap;
    use serde_json::json;
    use std::cell::RefCell;
    use std::net::Ipv4Addr;

    /// Prompter that answers every confirmation with a fixed value.
    struct FixedConfirm {
        interactive: bool,
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl FixedConfirm {
        fn new(answer: bool) -> Self {
            Self {
                interactive: true,
                answer,
                asked: RefCell::new(Vec::new()),
            }
        }

        fn detached() -> Self {
            Self {
                interactive: false,
                ..Self::new(true)
            }
        }
    }

    impl Prompter for FixedConfirm {
        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn input(&self, prompt: &str, _default: Option<&str>) -> Result<String> {
            Err(ConfigError::prompt(prompt, "unexpected input prompt").into())
        }

        fn password(&self, prompt: &str) -> Result<String> {
            Err(ConfigError::prompt(prompt, "unexpected password prompt").into())
        }

        fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(self.answer)
        }
    }

    fn plan() -> SyncPlan {
        let current: FirewallGroup = serde_json::from_value(json!({
            "_id": "60aa",
            "name": "monitoring",
            "group_members": ["10.0.0.1", "10.0.0.9"],
        }))
        .unwrap();
        let hosts: HostIpMap = [
            (Ipv4Addr::new(10, 0, 0, 5), String::from("a.example.com")),
            (Ipv4Addr::new(10, 0, 0, 1), String::from("b.example.com")),
        ]
        .into_iter()
        .collect();
        SyncPlan::new(current, &hosts)
    }

    fn text(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_hidden_info_prints_table_before_prompt() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let prompter = FixedConfirm::new(true);
        let review = DiffReview::new(&formatter, &prompter).with_info_visible(false);
        let plan = plan();
        let (mut stdout, mut stderr) = (Vec::new(), Vec::new());

        let shown = review.show("60aa", &plan.diff, &mut stdout, &mut stderr).unwrap();
        assert!(!shown);
        assert!(stderr.is_empty());

        assert!(review.approve(&plan, shown, &mut stderr).unwrap());
        let printed = text(stderr);
        assert!(printed.starts_with("Here is the list of 2 firewall group changes to make:"));
        assert!(printed.contains("10.0.0.5"));
        assert!(printed.contains("a.example.com"));
        assert!(stdout.is_empty());
        assert_eq!(*prompter.asked.borrow(), vec![APPLY_PROMPT.to_string()]);
    }

    #[test]
    fn test_visible_info_does_not_print_table_twice() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let prompter = FixedConfirm::new(false);
        let review = DiffReview::new(&formatter, &prompter).with_info_visible(true);
        let plan = plan();
        let (mut stdout, mut stderr) = (Vec::new(), Vec::new());

        let shown = review.show("60aa", &plan.diff, &mut stdout, &mut stderr).unwrap();
        assert!(shown);

        assert!(!review.approve(&plan, shown, &mut stderr).unwrap());
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
        assert_eq!(prompter.asked.borrow().len(), 1);
    }

    #[test]
    fn test_no_terminal_fails_with_missing_confirm() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let prompter = FixedConfirm::detached();
        let review = DiffReview::new(&formatter, &prompter).with_info_visible(true);
        let mut stderr = Vec::new();

        let result = review.approve(&plan(), true, &mut stderr);

        match result {
            Err(SyncError::Config(ConfigError::MissingValue { flag })) => {
                assert_eq!(flag, "confirm");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(prompter.asked.borrow().is_empty());
        assert!(stderr.is_empty());
    }

    #[test]
    fn test_json_output_still_shows_table_before_prompt() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let prompter = FixedConfirm::new(true);
        let review = DiffReview::new(&formatter, &prompter).with_info_visible(true);
        let plan = plan();
        let (mut stdout, mut stderr) = (Vec::new(), Vec::new());

        let shown = review.show("60aa", &plan.diff, &mut stdout, &mut stderr).unwrap();
        assert!(!shown);
        let json: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(json["changes"], 2);

        review.approve(&plan, shown, &mut stderr).unwrap();
        assert!(text(stderr).contains("IP Address"));
    }

    #[test]
    fn test_dry_run_with_hidden_info_prints_table() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let prompter = FixedConfirm::detached();
        let review = DiffReview::new(&formatter, &prompter)
            .with_info_visible(false)
            .with_dry_run(true);
        let plan = plan();
        let (mut stdout, mut stderr) = (Vec::new(), Vec::new());

        assert!(review.show("60aa", &plan.diff, &mut stdout, &mut stderr).unwrap());
        assert!(text(stderr).contains("10.0.0.9"));
    }
}
