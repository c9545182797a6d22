use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_atomic, PathResolver};
use crate::errors::{LedgerError, Result};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["currency_symbol", "allowed_email_domain", "recent_limit"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// Registration is limited to this domain when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_email_domain: Option<String>,
    /// Rows shown per section on the dashboard.
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            allowed_email_domain: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl Config {
    /// Updates one setting from its textual form. `none` or a blank value
    /// clears the domain restriction.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(LedgerError::Config(
                        "currency_symbol must not be empty".into(),
                    ));
                }
                self.currency_symbol = value.to_string();
            }
            "allowed_email_domain" => {
                let domain = value.trim_start_matches('@').to_lowercase();
                self.allowed_email_domain = if domain.is_empty() || domain == "none" {
                    None
                } else {
                    Some(domain)
                };
            }
            "recent_limit" => {
                let limit: usize = value.parse().map_err(|_| {
                    LedgerError::Config(format!(
                        "recent_limit must be a positive integer, got `{value}`"
                    ))
                })?;
                if limit == 0 {
                    return Err(LedgerError::Config(
                        "recent_limit must be at least 1".into(),
                    ));
                }
                self.recent_limit = limit;
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::from_base(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_reload_settings() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::from_base(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency_symbol", "US$").unwrap();
        config.set("allowed_email_domain", "@E-Flow.digital").unwrap();
        config.set("recent_limit", "8").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "US$");
        assert_eq!(loaded.allowed_email_domain.as_deref(), Some("e-flow.digital"));
        assert_eq!(loaded.recent_limit, 8);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config: Config = serde_json::from_str(r#"{"recent_limit": 3}"#).unwrap();
        assert_eq!(config.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
        assert_eq!(config.recent_limit, 3);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut config = Config::default();
        assert!(config.set("recent_limit", "0").is_err());
        assert!(config.set("recent_limit", "many").is_err());
        assert!(config.set("theme", "dark").is_err());
        config.set("allowed_email_domain", "x.io").unwrap();
        config.set("allowed_email_domain", "none").unwrap();
        assert!(config.allowed_email_domain.is_none());
    }
}
