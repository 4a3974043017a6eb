//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::session::OperatorCredentials;
use crate::reports::try_format_date;

/// Environment variable holding the operator password
pub const PASSWORD_ENV: &str = "BIBOARD_OPERATOR_PASSWORD";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "BIBOARD_CONFIG_DIR";

const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

/// Biboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub operator: OperatorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub username: String,
    #[serde(skip)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// strftime pattern for dates in tables
    pub date_format: String,
    /// Output format used when `--format` is not given
    pub default_format: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            username: "operator".to_string(),
            password: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
            default_format: "text".to_string(),
        }
    }
}

impl OperatorConfig {
    pub fn resolved_password(&self) -> anyhow::Result<Option<String>> {
        self.enforce_env_only()?;
        Ok(env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty()))
    }

    pub fn enforce_env_only(&self) -> anyhow::Result<()> {
        if self.password.is_some() {
            return Err(anyhow!(
                "Operator passwords must be provided via the {} environment variable, not stored in configuration",
                PASSWORD_ENV
            ));
        }
        Ok(())
    }

    /// Build credentials from the configured username and a password
    pub fn credentials_with(&self, password: Option<String>) -> anyhow::Result<OperatorCredentials> {
        let password = password.ok_or_else(|| {
            anyhow!(
                "No operator password configured. Set the {} environment variable.",
                PASSWORD_ENV
            )
        })?;
        Ok(OperatorCredentials::new(self.username.clone(), password))
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("biboard")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or the defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Defaults are not written until something is set
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.operator.enforce_env_only()?;

        if self.operator.username.trim().is_empty() {
            return Err(anyhow!("Operator username cannot be empty"));
        }
        validate_date_format(&self.display.date_format)?;
        validate_output_format(&self.display.default_format)?;
        Ok(())
    }

    /// Credentials for the login gate: configured username, password from the environment
    pub fn operator_credentials(&self) -> anyhow::Result<OperatorCredentials> {
        let password = self.operator.resolved_password()?;
        self.operator.credentials_with(password)
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "operator.username" => Ok(self.operator.username.clone()),

            // Password (special handling - never shown)
            "operator.password" => match self.operator.resolved_password()? {
                Some(_) => Ok("*** (from environment)".to_string()),
                None => Ok(format!("(not set - use {} env var)", PASSWORD_ENV)),
            },

            "display.date_format" => Ok(self.display.date_format.clone()),
            "display.default_format" => Ok(self.display.default_format.clone()),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `biboard config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "operator.username" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("Operator username cannot be empty"));
                }
                self.operator.username = value.to_string();
            }

            // Password cannot be set via config
            "operator.password" => {
                return Err(anyhow!(
                    "Passwords cannot be stored in configuration. \
                     Set the {} environment variable instead.",
                    PASSWORD_ENV
                ));
            }

            "display.date_format" => {
                validate_date_format(value)?;
                self.display.date_format = value.to_string();
            }
            "display.default_format" => {
                validate_output_format(value)?;
                self.display.default_format = value.to_string();
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `biboard config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "operator.username",
            "operator.password",
            "display.date_format",
            "display.default_format",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

fn validate_date_format(format: &str) -> anyhow::Result<()> {
    if format.trim().is_empty() {
        return Err(anyhow!("Date format cannot be empty"));
    }
    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).context("Invalid sample date")?;
    if try_format_date(sample, format).is_none() {
        return Err(anyhow!(
            "Invalid date format: {}. Use date fields only, e.g. %d/%m/%Y",
            format
        ));
    }
    Ok(())
}

fn validate_output_format(format: &str) -> anyhow::Result<()> {
    if !OUTPUT_FORMATS.contains(&format) {
        return Err(anyhow!(
            "Invalid output format: {}. Valid options: {}",
            format,
            OUTPUT_FORMATS.join(", ")
        ));
    }
    Ok(())
}
