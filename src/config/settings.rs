//! Run settings.
//!
//! Command line flags (with their environment fallbacks) are merged with
//! interactive answers for anything left unset, then validated into an
//! immutable [`SyncSettings`].

use clap::ValueEnum;
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;

use crate::cli::{Cli, Prompter};
use crate::error::{ConfigError, Result};

/// Default controller site.
pub const DEFAULT_SITE: &str = "default";

/// Log verbosity accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Payload dumps and per-host lookups.
    Debug,
    /// Pipeline progress.
    #[default]
    Info,
    /// Warnings only.
    Warning,
    /// Errors only.
    Error,
    /// Same as `error`.
    Critical,
}

impl LogLevel {
    /// Returns the `tracing` filter directive for this level.
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        write!(f, "{s}")
    }
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct SyncSettings {
    /// Controller base URL, without trailing slash.
    pub controller_url: String,
    /// Controller user.
    pub username: String,
    /// Controller password.
    pub password: String,
    /// Id of the firewall group to update.
    pub group_id: String,
    /// Host list file.
    pub host_file: PathBuf,
    /// Controller site name.
    pub site: String,
    /// Ask before applying changes.
    pub confirm: bool,
    /// Verify the controller's TLS certificate.
    pub verify_tls: bool,
    /// Show the diff and stop.
    pub dry_run: bool,
    /// Log verbosity.
    pub log_level: LogLevel,
}

impl fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSettings")
            .field("controller_url", &self.controller_url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("group_id", &self.group_id)
            .field("host_file", &self.host_file)
            .field("site", &self.site)
            .field("confirm", &self.confirm)
            .field("verify_tls", &self.verify_tls)
            .field("dry_run", &self.dry_run)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl SyncSettings {
    /// Resolves settings from parsed flags, prompting for missing values.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing and no terminal is
    /// available, or if a value fails validation.
    pub fn resolve(cli: Cli, prompter: &dyn Prompter) -> Result<Self> {
        let controller_url = required(
            cli.controller_url,
            "controller-url",
            "Unifi Controller URL path",
            prompter,
        )?;
        let controller_url = validate_url(&controller_url)?;

        let username = required(cli.username, "username", "Unifi Controller user", prompter)?;

        let password = match cli.password {
            Some(password) if !password.is_empty() => password,
            _ if prompter.is_interactive() => prompter.password("Unifi Controller password")?,
            _ => return Err(ConfigError::missing("password").into()),
        };

        let group_id = required(cli.group_id, "group-id", "Firewall group ID", prompter)?;

        let host_file = match cli.host_file {
            Some(path) => path,
            None => PathBuf::from(required(
                None,
                "host-file",
                "Path to host list file",
                prompter,
            )?),
        };
        if !host_file.is_file() {
            return Err(ConfigError::HostFileNotFound { path: host_file }.into());
        }

        let confirm = match cli.confirm {
            Some(confirm) => confirm,
            None if prompter.is_interactive() => {
                prompter.confirm("Confirm changes before update?", true)?
            }
            None => true,
        };

        let log_level = match cli.log_level {
            Some(level) => level,
            None if prompter.is_interactive() => {
                let answer = prompter.input("Log level", Some("INFO"))?;
                LogLevel::from_str(answer.trim(), true)
                    .map_err(|_| ConfigError::InvalidLogLevel { level: answer })?
            }
            None => LogLevel::default(),
        };

        Ok(Self {
            controller_url,
            username,
            password,
            group_id,
            host_file,
            site: cli.site,
            confirm,
            verify_tls: cli.verify_tls,
            dry_run: cli.dry_run,
            log_level,
        })
    }
}

/// Returns the flag value, or asks for it when a terminal is available.
fn required(
    value: Option<String>,
    flag: &str,
    label: &str,
    prompter: &dyn Prompter,
) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ if prompter.is_interactive() => Ok(prompter.input(label, None)?.trim().to_string()),
        _ => Err(ConfigError::missing(flag).into()),
    }
}

/// Checks the controller URL and strips any trailing slash.
fn validate_url(raw: &str) -> Result<String> {
    let invalid = |message: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        message,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())).into());
    }
    if url.host_str().is_none() {
        return Err(invalid(String::from("missing host")).into());
    }

    Ok(raw.trim_end_matches('/').to_string())
}
