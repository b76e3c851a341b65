#![deny(missing_docs)]

//! # Credentials Store
//!
//! File-backed token/host persistence under a fixed location, loaded at
//! startup and overwritten on explicit save. A missing file loads as empty
//! credentials.

use apiscout_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stored upstream credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// API token.
    #[serde(default)]
    pub token: String,
    /// Upstream host.
    #[serde(default)]
    pub host: String,
}

/// Arguments for the credentials command.
#[derive(clap::Args, Debug, Clone)]
pub struct CredentialsArgs {
    #[clap(subcommand)]
    command: CredentialsCommand,

    /// Override the credentials file location.
    #[clap(long, env = "APISCOUT_CREDENTIALS")]
    path: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum CredentialsCommand {
    /// Save token and host.
    Set {
        /// API token.
        #[clap(long)]
        token: String,
        /// Upstream host.
        #[clap(long)]
        host: String,
    },
    /// Print the stored credentials with the token redacted.
    Show,
}

/// Default store location: `.apiscout/credentials.json` under `$HOME`.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".apiscout").join("credentials.json")
}

/// Loads credentials from `path`; a missing file yields the empty default.
pub fn load(path: &Path) -> AppResult<StoredCredentials> {
    if !path.exists() {
        return Ok(StoredCredentials::default());
    }
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::General(format!("Corrupt credentials file: {}", e)))
}

/// Writes credentials to `path`, creating parent directories as needed.
pub fn save(path: &Path, credentials: &StoredCredentials) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(credentials)
        .map_err(|e| AppError::General(e.to_string()))?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Executes the credentials subcommand.
pub fn execute(args: &CredentialsArgs) -> AppResult<()> {
    let path = args.path.clone().unwrap_or_else(default_path);

    match &args.command {
        CredentialsCommand::Set { token, host } => {
            let credentials = StoredCredentials {
                token: token.clone(),
                host: host.clone(),
            };
            save(&path, &credentials)?;
            println!("Credentials saved to {}", path.display());
        }
        CredentialsCommand::Show => {
            let credentials = load(&path)?;
            println!("host:  {}", credentials.host);
            println!("token: {}", redact(&credentials.token));
        }
    }
    Ok(())
}

fn redact(token: &str) -> String {
    if token.is_empty() {
        return "(unset)".to_string();
    }
    let prefix: String = token.chars().take(4).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let credentials = StoredCredentials {
            token: "secret-token".into(),
            host: "app.example.com".into(),
        };
        save(&path, &credentials).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, credentials);
    }

    #[test]
    fn test_load_missing_file_defaults_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, StoredCredentials::default());
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Corrupt credentials file"));
    }

    #[test]
    fn test_save_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        save(
            &path,
            &StoredCredentials {
                token: "old".into(),
                host: "old.example.com".into(),
            },
        )
        .unwrap();
        save(
            &path,
            &StoredCredentials {
                token: "new".into(),
                host: "new.example.com".into(),
            },
        )
        .unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.token, "new");
        assert_eq!(loaded.host, "new.example.com");
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), "(unset)");
        assert_eq!(redact("abcdefgh"), "abcd...");
        assert_eq!(redact("ab"), "ab...");
    }
}
