//! Interactive prompts.
//!
//! Prompts are written to stderr so stdout stays clean for `--output json`.

use console::Term;
use std::io::IsTerminal;

use crate::error::{ConfigError, Result};

/// Source of interactive answers.
pub trait Prompter {
    /// Returns true if a user can be asked anything.
    fn is_interactive(&self) -> bool;

    /// Asks for a line of text; an empty answer yields `default` if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks for a secret without echo, entered twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn password(&self, prompt: &str) -> Result<String>;

    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter reading from the controlling terminal.
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    term: Term,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    /// Creates a prompter on stderr.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn ask(&self, prompt: &str, secure: bool) -> Result<String> {
        self.term
            .write_str(prompt)
            .map_err(|e| ConfigError::prompt(prompt, e.to_string()))?;

        let answer = if secure {
            self.term.read_secure_line()
        } else {
            self.term.read_line()
        };
        answer.map_err(|e| ConfigError::prompt(prompt, e.to_string()).into())
    }

    fn complain(&self, message: &str) {
        let _ = self.term.write_line(&format!("Error: {message}"));
    }
}

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        self.term.is_term() && std::io::stdin().is_terminal()
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let label = match default {
            Some(default) => format!("{prompt} [{default}]: "),
            None => format!("{prompt}: "),
        };

        loop {
            let answer = self.ask(&label, false)?;
            let answer = answer.trim();
            match (answer.is_empty(), default) {
                (false, _) => return Ok(answer.to_string()),
                (true, Some(default)) => return Ok(default.to_string()),
                (true, None) => {}
            }
        }
    }

    fn password(&self, prompt: &str) -> Result<String> {
        loop {
            let first = self.ask(&format!("{prompt}: "), true)?;
            if first.is_empty() {
                continue;
            }
            let second = self.ask("Repeat for confirmation: ", true)?;
            if first == second {
                return Ok(first);
            }
            self.complain("The two entered values do not match.");
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.ask(&format!("{prompt} [{hint}]: "), false)?;
            match parse_bool_answer(&answer) {
                Some(value) => return Ok(value),
                None if answer.trim().is_empty() => return Ok(default),
                None => self.complain(&format!("{} is not a valid boolean", answer.trim())),
            }
        }
    }
}

/// Interprets a yes/no answer.
#[must_use]
pub fn parse_bool_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "f" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_answer() {
        assert_eq!(parse_bool_answer("Y"), Some(true));
        assert_eq!(parse_bool_answer(" yes "), Some(true));
        assert_eq!(parse_bool_answer("False"), Some(false));
        assert_eq!(parse_bool_answer("0"), Some(false));
        assert_eq!(parse_bool_answer(""), None);
        assert_eq!(parse_bool_answer("maybe"), None);
    }
}
