// config.rs
// Settings file handling. The file is read once at startup and the
// resulting value is passed into whatever needs it; there is no
// ambient/static configuration state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Connection settings, deserialized from a JSON file with PascalCase
/// keys (`Server`, `Database`, ...). An empty `Username` selects
/// trusted authentication: the connection URL is built without
/// credentials.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub server: String,
    pub database: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Reserved for archival rotation; accepted so existing config
    /// files keep parsing, not read by the export path.
    #[serde(default)]
    #[allow(dead_code)]
    pub nb_backup_before_archive: u32,
}

impl Config {
    /// Reads and parses the settings file. Any failure here is fatal
    /// for the run: the caller aborts before touching the database.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("malformed config file {}", path.display()))?;
        Ok(config)
    }

    /// Trusted authentication is selected by leaving `Username` empty.
    pub fn uses_trusted_auth(&self) -> bool {
        self.username.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "Server": "db.example.com",
            "Database": "northwind",
            "Username": "reader",
            "Password": "hunter2",
            "NbBackupBeforeArchive": 5
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.server, "db.example.com");
        assert_eq!(config.database, "northwind");
        assert_eq!(config.username, "reader");
        assert_eq!(config.password, "hunter2");
        assert!(!config.uses_trusted_auth());
    }

    #[test]
    fn missing_credentials_mean_trusted_auth() {
        let json = r#"{"Server": "localhost", "Database": "app"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.uses_trusted_auth());
        assert_eq!(config.password, "");
    }

    #[test]
    fn load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn load_rejects_missing_file() {
        assert!(Config::load("/nonexistent/config.json").is_err());
    }
}
