//! User settings for FinVault
//!
//! Display and generation preferences: currency symbol, list page size,
//! default generated password length and the share endpoint.

use serde::{Deserialize, Serialize};

use super::paths::FinVaultPaths;
use crate::error::FinVaultError;

/// User settings for FinVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Rows per page in expense listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Length used by `password generate` when none is given
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    /// Base URL of the chat share endpoint
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_password_length() -> usize {
    crate::vault::DEFAULT_PASSWORD_LENGTH
}

fn default_share_base_url() -> String {
    crate::export::share::DEFAULT_SHARE_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            page_size: default_page_size(),
            password_length: default_password_length(),
            share_base_url: default_share_base_url(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinVaultPaths) -> Result<Self, FinVaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinVaultError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinVaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Not persisted until the caller asks for it
            Ok(Settings::default())
        }
    }

    /// Reject values that would break paging or generation
    pub fn validate(&self) -> Result<(), FinVaultError> {
        if self.page_size == 0 {
            return Err(FinVaultError::Config("page_size must be at least 1".into()));
        }
        if self.share_base_url.trim().is_empty() {
            return Err(FinVaultError::Config("share_base_url cannot be empty".into()));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinVaultPaths) -> Result<(), FinVaultError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinVaultError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FinVaultError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
