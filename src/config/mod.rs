//! Configuration module for the sync tool.
//!
//! This module handles all configuration-related functionality:
//! - Loading `UNIFI_*` variables from a `.env` file
//! - Merging command line flags with interactive answers
//! - Validating the result into [`SyncSettings`]

mod env;
mod settings;

pub use env::{load_dotenv, ENV_FILE};
pub use settings::{LogLevel, SyncSettings, DEFAULT_SITE};
