//! Runtime configuration.

use std::path::PathBuf;

use crate::normalizer::CurrencyLocale;
use crate::store::HISTORY_KEY;

/// Application directory name
pub const APP_NAME: &str = "medical-fees";

/// Environment variable overriding the database path.
pub const ENV_DATABASE: &str = "MEDICAL_FEES_DB";
/// Environment variable overriding the history key.
pub const ENV_HISTORY_KEY: &str = "MEDICAL_FEES_HISTORY_KEY";
/// Environment variable selecting the currency locale (`pt-BR`, `en-US`).
pub const ENV_LOCALE: &str = "MEDICAL_FEES_LOCALE";

/// Configuration for opening a [`crate::MedicalFeesCore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Store key holding the calculation history
    pub history_key: String,
    /// Currency locale used for parsing and display
    pub locale: CurrencyLocale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: app_data_dir().join("history.db"),
            history_key: HISTORY_KEY.to_string(),
            locale: CurrencyLocale::default(),
        }
    }
}

impl Config {
    /// Build from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Unknown locale tags keep the default
    /// locale.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_DATABASE) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(key) = get(ENV_HISTORY_KEY) {
            config.history_key = key;
        }
        if let Some(tag) = get(ENV_LOCALE) {
            match CurrencyLocale::from_tag(&tag) {
                Some(locale) => config.locale = locale,
                None => tracing::warn!(%tag, "unknown currency locale, keeping default"),
            }
        }

        config
    }
}

/// Get the application data directory.
///
/// Platform data directory when known (e.g. `~/.local/share/medical-fees`),
/// otherwise the working directory.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
