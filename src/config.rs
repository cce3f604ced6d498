// ABOUTME: Configuration structures and parsing for history, polling, and hotkey settings
// ABOUTME: TOML-backed with a commented default file written on first run

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub hotkey: HotkeyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HotkeyConfig {
    #[serde(default = "default_double_tap_window_ms")]
    pub double_tap_window_ms: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_capacity() -> usize {
    100
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_double_tap_window_ms() -> u64 {
    500
}

fn default_enabled() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: default_double_tap_window_ms(),
            enabled: default_enabled(),
        }
    }
}

impl Config {
    pub fn default_config_content() -> &'static str {
        r#"# MultiCopy Configuration

[history]
# How many clipboard entries to keep. Oldest entries are evicted first.
capacity = 100

[monitor]
# How often to check the clipboard for changes, in milliseconds.
# Lower values pick up copies faster at slightly higher CPU cost.
poll_interval_ms = 200

[hotkey]
# Window for the double-tap Option gesture, in milliseconds.
# Two Option presses within this window open the history popup.
double_tap_window_ms = 500
# Set to false to disable the global hotkey entirely (menu bar still works).
enabled = true
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("multicopy").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            anyhow::bail!("history capacity must be greater than 0");
        }

        if self.monitor.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms must be greater than 0");
        }

        if self.hotkey.double_tap_window_ms == 0 {
            anyhow::bail!("double_tap_window_ms must be greater than 0");
        }

        Ok(())
    }

    pub fn save_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config to: {}", path.display()))?;

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.poll_interval_ms)
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.hotkey.double_tap_window_ms)
    }
}
