//! Error types for the firewall group sync tool.
//!
//! Every stage of a run (configuration, hostname resolution, controller
//! access) has its own error enum; all of them fold into [`SyncError`],
//! which the binary turns into a non-zero exit status.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Hostname file and DNS resolution errors.
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Controller API errors.
    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was neither given nor promptable.
    #[error("Missing value for --{flag} (no terminal available to prompt)")]
    MissingValue {
        /// Name of the command-line flag.
        flag: String,
    },

    /// The controller URL could not be parsed.
    #[error("Invalid controller URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The host list file does not exist.
    #[error("Host file not found: {path}")]
    HostFileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The log level is not one of the accepted names.
    #[error("Invalid log level: {level}")]
    InvalidLogLevel {
        /// The rejected level.
        level: String,
    },

    /// Reading an interactive answer failed.
    #[error("Failed to read answer for '{prompt}': {message}")]
    PromptFailed {
        /// The prompt that was shown.
        prompt: String,
        /// Description of the failure.
        message: String,
    },

    /// The .env file exists but could not be loaded.
    #[error("Failed to load environment file {path}: {message}")]
    EnvFile {
        /// Path to the .env file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

/// Hostname file and DNS resolution errors.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The host file could not be read.
    #[error("Failed to read host file {path}: {message}")]
    HostFileUnreadable {
        /// Path to the host file.
        path: PathBuf,
        /// Description of the read failure.
        message: String,
    },

    /// The host file contained no hostnames.
    #[error("Host file {path} contains no hostnames")]
    EmptyHostList {
        /// Path to the host file.
        path: PathBuf,
    },

    /// DNS lookup failed for a hostname.
    #[error("DNS lookup failed for {host}: {message}")]
    LookupFailed {
        /// The hostname being resolved.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The hostname resolved, but not to any IPv4 address.
    #[error("{host} has no IPv4 address records")]
    NoIpv4Address {
        /// The hostname being resolved.
        host: String,
    },
}

/// Controller API errors.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The request never produced a response.
    #[error("Network error communicating with controller: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// The controller answered with a non-200 status.
    #[error("Controller request failed: {status}\n{body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response envelope reported a failure.
    #[error("Controller returned rc '{rc}'\n{body}")]
    Envelope {
        /// The `meta.rc` value.
        rc: String,
        /// Raw response body.
        body: String,
    },

    /// The response body could not be understood.
    #[error("Invalid response from controller: {message}\n{body}")]
    InvalidResponse {
        /// Description of the problem.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The requested firewall group is not on the controller.
    #[error("Firewall group {group_id} not found in:\n{available}")]
    GroupNotFound {
        /// The requested group id.
        group_id: String,
        /// Listing of the groups that were returned.
        available: String,
    },
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

impl ConfigError {
    /// Creates a missing value error for a flag.
    #[must_use]
    pub fn missing(flag: impl Into<String>) -> Self {
        Self::MissingValue { flag: flag.into() }
    }

    /// Creates a prompt failure error.
    #[must_use]
    pub fn prompt(prompt: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PromptFailed {
            prompt: prompt.into(),
            message: message.into(),
        }
    }
}

impl ResolveError {
    /// Creates a lookup error for a host.
    #[must_use]
    pub fn lookup(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            host: host.into(),
            message: message.into(),
        }
    }
}

impl ControllerError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid response error carrying the raw body.
    #[must_use]
    pub fn invalid(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_surfaces_raw_body() {
        let err: SyncError = ControllerError::HttpStatus {
            status: 401,
            body: String::from(r#"{"meta":{"rc":"error","msg":"api.err.Invalid"}}"#),
        }
        .into();

        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("api.err.Invalid"));
    }

    #[test]
    fn test_missing_value_names_flag() {
        let err = ConfigError::missing("group-id");
        assert_eq!(
            err.to_string(),
            "Missing value for --group-id (no terminal available to prompt)"
        );
    }
}
