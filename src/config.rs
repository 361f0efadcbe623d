use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::system::platform::{SourceContext, UptimeClock};

/// Bounds for any helper process started on our behalf.
const HELPER_TIMEOUT_MIN_MS: u64 = 2000;
const HELPER_TIMEOUT_MAX_MS: u64 = 3000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Tui,
    Plain,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub render_mode: RenderMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UptimeClockSetting {
    #[default]
    Tick,
    BootTime,
}

impl From<UptimeClockSetting> for UptimeClock {
    fn from(setting: UptimeClockSetting) -> Self {
        match setting {
            UptimeClockSetting::Tick => UptimeClock::Tick,
            UptimeClockSetting::BootTime => UptimeClock::BootTime,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub proc_root: PathBuf,
    pub helper_timeout_ms: u64,
    pub uptime_clock: UptimeClockSetting,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            proc_root: PathBuf::from("/proc"),
            helper_timeout_ms: 2500,
            uptime_clock: UptimeClockSetting::Tick,
        }
    }
}

impl SourceConfig {
    pub fn helper_timeout(&self) -> Duration {
        Duration::from_millis(
            self.helper_timeout_ms
                .clamp(HELPER_TIMEOUT_MIN_MS, HELPER_TIMEOUT_MAX_MS),
        )
    }

    /// Build the startup context. The boot time is filled in by the caller
    /// once the helper has run.
    pub fn context(&self) -> SourceContext {
        SourceContext {
            proc_root: self.proc_root.clone(),
            uptime_clock: self.uptime_clock.into(),
            boot_time: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("toptick").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
