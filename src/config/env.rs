//! Environment file loading.
//!
//! Values in `.env` feed the `UNIFI_*` variables read by the command line
//! parser. Variables already set in the process environment win.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Name of the environment file.
pub const ENV_FILE: &str = ".env";

/// Loads `.env` from `base_dir` (or the working directory) if present.
///
/// Returns the path that was loaded, if any. Runs before logging is set up,
/// so the caller reports the result.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_dotenv(base_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let env_path = base_dir.map_or_else(|| PathBuf::from(ENV_FILE), |dir| dir.join(ENV_FILE));

    if !env_path.exists() {
        return Ok(None);
    }

    dotenvy::from_path(&env_path).map_err(|e| ConfigError::EnvFile {
        path: env_path.clone(),
        message: e.to_string(),
    })?;

    Ok(Some(env_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv(Some(dir.path())).unwrap(), None);
    }

    #[test]
    fn test_env_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ENV_FILE),
            "UNIFI_GROUP_SYNC_TEST_MARKER=loaded\n",
        )
        .unwrap();

        let loaded = load_dotenv(Some(dir.path())).unwrap();
        assert_eq!(loaded, Some(dir.path().join(ENV_FILE)));
        assert_eq!(
            std::env::var("UNIFI_GROUP_SYNC_TEST_MARKER").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn test_malformed_env_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_FILE), "UNIFI_GROUP_SYNC_BROKEN='unterminated\n").unwrap();

        let result = load_dotenv(Some(dir.path()));
        assert!(matches!(
            result,
            Err(SyncError::Config(ConfigError::EnvFile { .. }))
        ));
    }
}
