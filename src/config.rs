use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

// Default configuration
pub const DEFAULT_SERVER_URL: &str = "https://truthanddareserver.onrender.com/";
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_HANDSHAKE_TIMEOUT_MS: u64 = 20_000;

/// Where the login password is kept between runs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStorage {
    /// OS keyring; the credential file only holds id and username
    #[default]
    Keyring,
    /// Plaintext inside the credential file
    File,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub dark_mode: bool,
    pub show_edit_section: bool,
    pub password_storage: PasswordStorage,
    pub message_notification_ms: u64,
    pub reveal_notification_ms: u64,
    pub reconnect_delay_ms: u64,
    pub handshake_timeout_ms: u64,
    /// Write chat transcripts to the data directory
    pub log_chat: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            dark_mode: false,
            show_edit_section: true,
            password_storage: PasswordStorage::default(),
            message_notification_ms: crate::notifications::MESSAGE_BANNER_DURATION.as_millis()
                as u64,
            reveal_notification_ms: crate::notifications::REVEAL_BANNER_DURATION.as_millis()
                as u64,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            handshake_timeout_ms: DEFAULT_HANDSHAKE_TIMEOUT_MS,
            log_chat: false,
        }
    }
}

/// Connection parameters handed to the backend thread at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionConfig {
    pub server_url: String,
    pub reconnect_delay: Duration,
    pub handshake_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Settings::default().connection()
    }
}

impl Settings {
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            server_url: self.server_url.clone(),
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            handshake_timeout: Duration::from_millis(self.handshake_timeout_ms),
        }
    }

    pub fn message_notification(&self) -> Duration {
        Duration::from_millis(self.message_notification_ms)
    }

    pub fn reveal_notification(&self) -> Duration {
        Duration::from_millis(self.reveal_notification_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "truthdare", "truthdare-client")
}

pub fn settings_path() -> Option<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!("Failed to create config dir: {}", e);
        return None;
    }
    Some(dir.join("settings.json"))
}

/// Data directory for the credential record and chat transcripts.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.data_dir().to_path_buf())
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    if let Some(path) = settings_path() {
        save_settings_to(settings, &path)?;
    }
    Ok(())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "truthdare-config-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir.join("settings.json")
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
        assert_eq!(s.connection().reconnect_delay, Duration::from_secs(1));
        assert_eq!(s.message_notification(), Duration::from_secs(10));
        assert_eq!(s.reveal_notification(), Duration::from_secs(7));
        assert_eq!(s.password_storage, PasswordStorage::Keyring);
        assert!(s.show_edit_section);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "dark_mode": true }"#).unwrap();
        assert!(s.dark_mode);
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
        assert_eq!(s.reconnect_delay_ms, DEFAULT_RECONNECT_DELAY_MS);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            dark_mode: true,
            password_storage: PasswordStorage::File,
            server_url: "http://localhost:3000".into(),
            ..Settings::default()
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), Some(settings));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_settings_are_ignored() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), None);
        let _ = fs::remove_file(&path);
    }
}
