use crate::utils::error::{Result, UploadError};
use crate::utils::validation::{validate_database_url, validate_non_empty_string, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file, currently only the `[database]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Connection settings. `url` wins over the individual fields when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
}

impl TomlConfig {
    /// Loads the settings file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UploadError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` placeholders with values from the environment.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UploadError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        // Unset variables are left as written.
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            validate_database_url("database.url", url)?;
        }
        if let Some(host) = &self.host {
            validate_non_empty_string("database.host", host)?;
        }
        if let Some(name) = &self.name {
            validate_non_empty_string("database.name", name)?;
        }
        if let Some(port) = self.port {
            validate_range("database.port", port, 1, u16::MAX)?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.database.validate()
    }
}
