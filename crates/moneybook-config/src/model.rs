use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

pub const MAX_WINDOW_HALF_WIDTH: usize = 6;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Title of the ledger group the shell starts in; `None` shows every group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_group: Option<String>,
    #[serde(default = "Config::default_window_half_width")]
    pub window_half_width: usize,
    /// Chart colours as `#rrggbb`, in rank order.
    #[serde(default = "Config::default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for ledger CSV files. Defaults to the platform data dir.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "ko-KR".into(),
            currency: "KRW".into(),
            current_group: None,
            window_half_width: Self::default_window_half_width(),
            palette: Self::default_palette(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_window_half_width() -> usize {
        2
    }

    pub fn default_palette() -> Vec<String> {
        [
            "#5f3f16", "#76562d", "#8d6d45", "#a4845c", "#ba9b73", "#d1b28a", "#e8c9a2",
        ]
        .iter()
        .map(|hex| hex.to_string())
        .collect()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("moneybook")
    }

    /// Updates one preference from its textual form, as typed in the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(value).ok_or_else(invalid)?,
            "currency" => {
                self.currency = non_empty(value).ok_or_else(invalid)?.to_ascii_uppercase()
            }
            "current_group" | "group" => self.current_group = non_empty(value),
            "window_half_width" | "window" => {
                let width: usize = value.parse().map_err(|_| invalid())?;
                if width > MAX_WINDOW_HALF_WIDTH {
                    return Err(invalid());
                }
                self.window_half_width = width;
            }
            "palette" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|hex| !hex.is_empty())
                    .map(str::to_string)
                    .collect();
                if colors.is_empty() || !colors.iter().all(|hex| is_hex_color(hex)) {
                    return Err(invalid());
                }
                self.palette = colors;
            }
            "ui_color_enabled" | "color" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "1" | "yes" => true,
                    "off" | "false" | "0" | "no" => false,
                    _ => return Err(invalid()),
                }
            }
            "data_root" => self.data_root = non_empty(value).map(PathBuf::from),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && trimmed != "-").then(|| trimmed.to_string())
}

fn is_hex_color(value: &str) -> bool {
    let digits = value.strip_prefix('#').unwrap_or(value);
    digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}
