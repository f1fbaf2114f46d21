use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "ACCUWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_postal_code = "02134"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_postal_code: Option<String>,
}

impl Config {
    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Pick the API key: a non-empty environment value wins over the stored one.
    pub fn resolve_api_key(&self, env_override: Option<String>) -> Result<String> {
        env_override
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: set {API_KEY_ENV} or run `forecast configure` and enter your API key."
                )
            })
    }

    /// Pick the postal code: an explicit argument wins over the configured default.
    pub fn resolve_postal_code(&self, arg: Option<String>) -> Result<String> {
        arg.or_else(|| self.default_postal_code.clone()).ok_or_else(|| {
            anyhow!(
                "No postal code given and no default configured.\n\
                 Hint: pass one, e.g. `forecast show 02134`, or run `forecast configure`."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_from_missing_file_yields_default() {
        let dir = tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_creates_parent_dirs_and_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("k".repeat(32)),
            default_postal_code: Some("00501".into()),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_postal_code.as_deref(), Some("00501"));
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let cfg = Config { api_key: Some("FILE_KEY".into()), ..Config::default() };

        assert_eq!(cfg.resolve_api_key(Some("ENV_KEY".into())).unwrap(), "ENV_KEY");
        assert_eq!(cfg.resolve_api_key(Some(String::new())).unwrap(), "FILE_KEY");
        assert_eq!(cfg.resolve_api_key(None).unwrap(), "FILE_KEY");
    }

    #[test]
    fn missing_api_key_has_hint() {
        let err = Config::default().resolve_api_key(None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("forecast configure"));
    }

    #[test]
    fn postal_code_argument_beats_default() {
        let cfg = Config { default_postal_code: Some("02134".into()), ..Config::default() };

        assert_eq!(cfg.resolve_postal_code(Some("10001".into())).unwrap(), "10001");
        assert_eq!(cfg.resolve_postal_code(None).unwrap(), "02134");
        assert!(Config::default().resolve_postal_code(None).is_err());
    }
}
