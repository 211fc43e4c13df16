use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BriefError, Result};
use crate::url::parse_base_url;

/// Environment variable that overrides the API host.
pub const BASE_URL_ENV: &str = "BREEZYBRIEF_API_BASE_URL";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "BREEZYBRIEF_CONFIG";

/// Root application configuration, loaded from `~/.config/breezybrief/config.toml`.
///
/// Resolved once at startup and handed to the networking and UI layers;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// `limit` sent to the airport search.
    pub search_limit: usize,
    pub forecast_timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period before a suggestion search fires.
    pub debounce_ms: u64,
    pub max_visible_suggestions: usize,
    pub tick_rate_ms: u64,
    pub default_calm: bool,
    pub default_cruise_fl: u16,
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            search_limit: 10,
            forecast_timeout_secs: 90,
            user_agent: format!("breezybrief/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 180,
            max_visible_suggestions: 8,
            tick_rate_ms: 50,
            default_calm: true,
            default_cruise_fl: crate::models::DEFAULT_CRUISE_FL,
            mouse: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let dir = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("breezybrief");
        Self {
            directory: dir.to_string_lossy().to_string(),
            file: "breezybrief.log".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/breezybrief/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("breezybrief")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    /// Applies `BREEZYBRIEF_API_BASE_URL` on top.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(base) = std::env::var(BASE_URL_ENV)
            && !base.trim().is_empty()
        {
            config.set_base_url(&base)?;
        }
        Ok(config)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Replace the API host. Only `http://` and `https://` bases are accepted.
    pub fn set_base_url(&mut self, base: &str) -> Result<()> {
        let base = base.trim().trim_end_matches('/');
        check_base_url(base)?;
        self.api.base_url = base.to_string();
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        check_base_url(&self.api.base_url)?;
        if self.ui.max_visible_suggestions == 0 {
            return Err(BriefError::ConfigError(
                "ui.max_visible_suggestions must be at least 1".to_string(),
            ));
        }
        if self.ui.default_cruise_fl > crate::models::MAX_CRUISE_FL {
            return Err(BriefError::ConfigError(format!(
                "ui.default_cruise_fl must be at most {}",
                crate::models::MAX_CRUISE_FL
            )));
        }
        Ok(())
    }

    // ─── Derived values ────────────────────────────────────

    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.ui.debounce_ms)
    }

    pub fn forecast_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.forecast_timeout_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.directory)
    }
}

fn check_base_url(base: &str) -> Result<()> {
    match parse_base_url(base) {
        Some(_) => Ok(()),
        None => Err(BriefError::InvalidBaseUrl(base.to_string())),
    }
}
