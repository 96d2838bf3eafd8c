//! Diagnostics setup and chat transcript persistence.
//!
//! Transcripts are stored under the data directory as
//! `logs/<login id>/YYYY-MM-DD.log`, written by a background thread so the
//! UI never blocks on disk.

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("truthdare_client=info"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// A transcript line to be written to disk
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub account: String,
    pub timestamp: String,
    pub username: String,
    pub message: String,
}

/// Writes chat transcripts without blocking the UI thread
pub struct ChatLogger {
    tx: Sender<LogEntry>,
}

impl ChatLogger {
    /// Logger rooted in the default data directory.
    pub fn new() -> Result<Self> {
        let dir = crate::config::data_dir()
            .ok_or_else(|| std::io::Error::other("Failed to determine data directory"))?;
        Self::with_dir(dir.join("logs"))
    }

    pub fn with_dir(log_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&log_dir)?;

        let (tx, rx) = unbounded::<LogEntry>();
        thread::spawn(move || {
            run_logger_thread(rx, log_dir);
        });

        Ok(Self { tx })
    }

    /// Queue a line for writing (non-blocking)
    pub fn log(&self, entry: LogEntry) {
        // If send fails, the logger thread has stopped
        let _ = self.tx.send(entry);
    }
}

fn run_logger_thread(rx: Receiver<LogEntry>, log_dir: PathBuf) {
    // Cache of open file handles to avoid reopening files constantly
    let mut file_cache: HashMap<String, BufWriter<File>> = HashMap::new();

    while let Ok(entry) = rx.recv() {
        if let Err(e) = write_log_entry(&mut file_cache, &log_dir, &entry) {
            tracing::warn!("Transcript write failed: {}", e);
        }
    }

    for (_, mut writer) in file_cache.drain() {
        let _ = writer.flush();
    }
}

fn write_log_entry(
    file_cache: &mut HashMap<String, BufWriter<File>>,
    log_dir: &Path,
    entry: &LogEntry,
) -> Result<()> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let account = sanitize_filename(&entry.account);
    let cache_key = format!("{}/{}", account, date);

    if !file_cache.contains_key(&cache_key) {
        let account_dir = log_dir.join(&account);
        fs::create_dir_all(&account_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(account_dir.join(format!("{}.log", date)))?;
        file_cache.insert(cache_key.clone(), BufWriter::new(file));
    }

    if let Some(writer) = file_cache.get_mut(&cache_key) {
        // Format: [HH:MM:SS] <user> message
        writeln!(writer, "[{}] <{}> {}", entry.timestamp, entry.username, entry.message)?;
        writer.flush()?;
    }
    Ok(())
}

/// Make a login id safe to use as a directory name
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("betu"), "betu");
        assert_eq!(sanitize_filename("../etc"), "___etc");
        assert_eq!(sanitize_filename("a/b"), "a_b");
        assert_eq!(sanitize_filename(""), "_");
    }

    #[test]
    fn test_transcript_written_to_account_dir() {
        let dir = std::env::temp_dir().join(format!("truthdare-logs-{}", std::process::id()));
        let logger = ChatLogger::with_dir(dir.clone()).unwrap();
        logger.log(LogEntry {
            account: "betu".into(),
            timestamp: "12:00:00".into(),
            username: "Puchu".into(),
            message: "hello".into(),
        });
        drop(logger);

        let date = Local::now().format("%Y-%m-%d").to_string();
        let path = dir.join("betu").join(format!("{}.log", date));
        let mut content = String::new();
        for _ in 0..50 {
            if let Ok(c) = fs::read_to_string(&path) {
                if !c.is_empty() {
                    content = c;
                    break;
                }
            }
            thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(content, "[12:00:00] <Puchu> hello\n");
        let _ = fs::remove_dir_all(&dir);
    }
}
