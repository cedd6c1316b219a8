use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::copilot::CopilotTiming;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_TOML: &str = include_str!("../assets/default_config.toml");
const USER_CONFIG_RELATIVE_PATH: &str = ".pilotpad/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub copilot: CopilotConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopilotConfig {
    pub analysis_delay_ms: u64,
    pub answer_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme_file: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            copilot: CopilotConfig::default(),
            notifications: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 1000,
            answer_delay_ms: 1500,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "~/.pilotpad/pilotpad.log".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_file: "theme.toml".to_string(),
        }
    }
}

impl EditorConfig {
    /// Explicit paths must exist. Without one, the per-user file is used when present.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            let text = read_config_text(path)?;
            return Self::from_toml_str(&text);
        }
        let Some(user_path) = user_config_path() else {
            return Self::from_toml_str("");
        };
        match fs::read_to_string(&user_path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::from_toml_str(""),
            Err(source) => Err(ConfigError::Read {
                path: user_path,
                source,
            }),
        }
    }

    /// Layers `text` over the embedded defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut merged = parse_toml_table(DEFAULT_CONFIG_TOML)?;
        let override_value = parse_toml_table(text)?;
        merge_toml_tables(&mut merged, override_value);
        Ok(Self::deserialize(merged)?)
    }

    pub fn copilot_timing(&self) -> CopilotTiming {
        CopilotTiming {
            analysis_delay: Duration::from_millis(self.copilot.analysis_delay_ms),
            answer_delay: Duration::from_millis(self.copilot.answer_delay_ms),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }

    pub fn log_file_path(&self) -> PathBuf {
        expand_home(&self.logging.file)
    }

    pub fn theme_path(&self) -> PathBuf {
        expand_home(&self.ui.theme_file)
    }
}

fn read_config_text(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn user_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(USER_CONFIG_RELATIVE_PATH))
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(path)
}

fn parse_toml_table(text: &str) -> Result<toml::Value, ConfigError> {
    if text.trim().is_empty() {
        return Ok(toml::Value::Table(toml::map::Map::new()));
    }
    Ok(toml::from_str(text)?)
}

fn merge_toml_tables(base: &mut toml::Value, override_value: toml::Value) {
    match (base, override_value) {
        (toml::Value::Table(base_map), toml::Value::Table(override_map)) => {
            for (key, override_item) in override_map {
                if let Some(base_item) = base_map.get_mut(&key) {
                    merge_toml_tables(base_item, override_item);
                } else {
                    base_map.insert(key, override_item);
                }
            }
        }
        (base_slot, override_item) => {
            *base_slot = override_item;
        }
    }
}
