//! Single-slot persistence of the last successful login.
//!
//! The record lives under the fixed key [`STORAGE_KEY`]. With
//! [`PasswordStorage::Keyring`] the password goes to the OS keyring and the
//! file only keeps id, username and the logged-in flag.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::PasswordStorage;
use crate::error::Result;

pub const STORAGE_KEY: &str = "loveSyncAuth";
const KEYRING_SERVICE: &str = "truthdare-client";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    pub id: String,
    pub password: String,
    pub username: String,
    pub is_logged_in: bool,
}

impl AuthRecord {
    pub fn new(id: &str, password: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            password: password.to_string(),
            username: username.to_string(),
            is_logged_in: true,
        }
    }

    /// Enough to reconnect without prompting.
    pub fn can_resume(&self) -> bool {
        self.is_logged_in && !self.id.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for AuthRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRecord")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .field("username", &self.username)
            .field("is_logged_in", &self.is_logged_in)
            .finish()
    }
}

pub trait CredentialStore {
    /// Overwrite the slot with a logged-in record.
    fn save(&mut self, id: &str, password: &str, username: &str) -> Result<()>;
    fn read(&self) -> Option<AuthRecord>;
    fn clear(&mut self) -> Result<()>;
}

/// In-process store, used in tests and when no data directory exists.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Option<AuthRecord>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&mut self, id: &str, password: &str, username: &str) -> Result<()> {
        self.record = Some(AuthRecord::new(id, password, username));
        Ok(())
    }

    fn read(&self) -> Option<AuthRecord> {
        self.record.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.record = None;
        Ok(())
    }
}

/// On-disk shape; `password` is absent when it lives in the keyring.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    username: String,
    #[serde(default)]
    is_logged_in: bool,
}

pub struct FileCredentialStore {
    path: PathBuf,
    storage: PasswordStorage,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>, storage: PasswordStorage) -> Self {
        Self {
            path: dir.into().join(format!("{}.json", STORAGE_KEY)),
            storage,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn keyring_entry() -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(KEYRING_SERVICE, STORAGE_KEY)?)
    }

    fn write_record(&self, record: &StoredRecord) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&mut self, id: &str, password: &str, username: &str) -> Result<()> {
        let password = match self.storage {
            PasswordStorage::Keyring => match Self::keyring_entry()
                .and_then(|entry| entry.set_password(password).map_err(Into::into))
            {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Keyring unavailable ({}); storing password in file", e);
                    Some(password.to_string())
                }
            },
            PasswordStorage::File => Some(password.to_string()),
        };

        self.write_record(&StoredRecord {
            id: id.to_string(),
            password,
            username: username.to_string(),
            is_logged_in: true,
        })
    }

    fn read(&self) -> Option<AuthRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return None;
            }
        };
        let stored: StoredRecord = match serde_json::from_str(&content) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Discarding unreadable credential record: {}", e);
                return None;
            }
        };

        let password = match stored.password {
            Some(p) => p,
            None => match Self::keyring_entry().and_then(|e| e.get_password().map_err(Into::into)) {
                Ok(p) => p,
                Err(e) => {
                    tracing::debug!("No password recoverable for saved login: {}", e);
                    return None;
                }
            },
        };

        Some(AuthRecord {
            id: stored.id,
            password,
            username: stored.username,
            is_logged_in: stored.is_logged_in,
        })
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if self.storage == PasswordStorage::Keyring {
            match Self::keyring_entry().and_then(|e| e.delete_password().map_err(Into::into)) {
                Ok(()) => {}
                Err(crate::error::ClientError::Keyring(keyring::Error::NoEntry)) => {}
                Err(e) => tracing::debug!("Keyring cleanup skipped: {}", e),
            }
        }
        Ok(())
    }
}

/// The store the app uses: file-backed in the data directory when there is one.
pub fn open_store(storage: PasswordStorage) -> Box<dyn CredentialStore> {
    match crate::config::data_dir() {
        Some(dir) => Box::new(FileCredentialStore::new(dir, storage)),
        None => {
            tracing::warn!("No data directory; login will not survive a restart");
            Box::new(MemoryCredentialStore::new())
        }
    }
}
