//! Action audit logging to disk.
//!
//! When enabled, appends every applied store action to daily log files
//! named `actions_<date>.log` in the configured log directory (default:
//! `~/.local/share/userdeck/logs/`).

use crate::config::model::LoggingConfig;
use crate::store::StoreAction;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Appends applied actions to daily audit files.
///
/// File handles are cached for the lifetime of the logger to avoid repeated
/// opens. Falls back to `/dev/null` if a log file cannot be created.
pub struct AuditLogger {
    enabled: bool,
    log_dir: String,
    file_handles: HashMap<String, fs::File>,
}

impl AuditLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            log_dir: config.log_dir.clone(),
            file_handles: HashMap::new(),
        }
    }

    /// Write one line for an applied action. No-op if logging is disabled.
    pub fn log_action(&mut self, action: &StoreAction) {
        if !self.enabled {
            return;
        }

        let detail = match action {
            StoreAction::SetLoading(flag) => format!("loading={}", flag),
            StoreAction::SetCurrentUser(user) => format!("id={} name={}", user.id, user.name),
            StoreAction::SetUsers(users) => format!("count={}", users.len()),
            StoreAction::AddUser(user) => format!("id={} name={}", user.id, user.name),
            StoreAction::UpdateUser { id, .. } => format!("id={}", id),
            StoreAction::DeleteUser(id) => format!("id={}", id),
            StoreAction::SetError(message) => format!("message={:?}", message),
            StoreAction::ClearError => String::new(),
        };

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let line = format!("[{}] {} {}", timestamp, action.kind(), detail);

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("actions_{}.log", date);
        let log_dir = expand_home(&self.log_dir);
        let filepath = log_dir.join(&filename);

        let handle = self.file_handles.entry(filename).or_insert_with(|| {
            let _ = fs::create_dir_all(&log_dir);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&filepath)
                .unwrap_or_else(|_| {
                    // Fallback: a file that goes nowhere
                    OpenOptions::new()
                        .write(true)
                        .open(if cfg!(unix) { "/dev/null" } else { "NUL" })
                        .unwrap()
                })
        });

        let _ = writeln!(handle, "{}", line.trim_end());
    }
}

/// Expand a leading `~` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
