//! CLI module for the sync tool.
//!
//! This module provides the command-line interface: argument parsing,
//! interactive prompts, diff rendering and the approval step.

mod commands;
mod output;
mod prompt;
mod review;

pub use commands::{Cli, OutputFormat};
pub use output::OutputFormatter;
pub use prompt::{parse_bool_answer, Prompter, TerminalPrompter};
pub use review::{DiffReview, APPLY_PROMPT};
