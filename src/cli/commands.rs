//! CLI argument definitions.
//!
//! Every connection value can also come from a `UNIFI_*` environment
//! variable (or `.env`); anything still missing is asked for interactively.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::{LogLevel, DEFAULT_SITE};

/// Sync a UniFi Controller firewall group with the DNS resolution of a
/// list of hostnames.
#[derive(Parser, Debug)]
#[command(name = "unifi-group-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Full URL to the Unifi Controller including protocol, host, and port
    /// (for example "https://192.168.1.2:8443").
    #[arg(long, env = "UNIFI_CONTROLLER_URL")]
    pub controller_url: Option<String>,

    /// Username for the Unifi Controller.
    #[arg(long, env = "UNIFI_USERNAME")]
    pub username: Option<String>,

    /// Password for the Unifi Controller.
    #[arg(long, env = "UNIFI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Firewall group ID to update. Open the group in the controller UI and
    /// copy the id from the end of the URL.
    #[arg(long, env = "UNIFI_GROUP_ID")]
    pub group_id: Option<String>,

    /// File with the hostnames to resolve, one per line.
    #[arg(long, env = "UNIFI_HOST_FILE")]
    pub host_file: Option<PathBuf>,

    /// Controller site the group belongs to.
    #[arg(long, env = "UNIFI_SITE", default_value = DEFAULT_SITE)]
    pub site: String,

    /// Ask for confirmation before updating (true/false).
    #[arg(long, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub confirm: Option<bool>,

    /// Verify the controller's TLS certificate (true/false).
    #[arg(long, action = ArgAction::Set, default_value_t = false, value_parser = BoolishValueParser::new())]
    pub verify_tls: bool,

    /// Show the changes without applying them.
    #[arg(long)]
    pub dry_run: bool,

    /// Log level.
    #[arg(long, env = "UNIFI_LOG_LEVEL", value_enum, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Diff output format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
