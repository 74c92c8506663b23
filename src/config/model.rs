//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Ask before deleting a user from the roster.
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            timestamp_format: default_timestamp_format(),
            confirm_delete: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Ticks between starting a simulated refresh and its completion.
    #[serde(default = "default_refresh_delay_ticks")]
    pub refresh_delay_ticks: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ticks: default_refresh_delay_ticks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enables the action audit log.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_true() -> bool {
    true
}

fn default_refresh_delay_ticks() -> u64 {
    8
}

fn default_log_dir() -> String {
    "~/.local/share/userdeck/logs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.ui.tick_rate_ms, 100);
        assert!(cfg.ui.confirm_delete);
        assert!(cfg.directory.refresh_delay_ticks > 0);
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [ui]
            confirm_delete = false
            "#,
        )
        .unwrap();
        assert!(!cfg.ui.confirm_delete);
        assert_eq!(cfg.ui.tick_rate_ms, 100);
        assert_eq!(cfg.logging.log_dir, "~/.local/share/userdeck/logs");
    }
}
