use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ConnectionString, ConnectionStringError};
use crate::no_sql::SAMPLE_TABLE_NAME;

/// Environment variable overriding `AzureTableStorage.ConnectionString`.
pub static CONNECTION_STRING_ENV: &str = "AzureTableStorage__ConnectionString";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("AzureTableStorage.ConnectionString is not configured")]
    MissingConnectionString,

    #[error("invalid AzureTableStorage.ConnectionString: {0}")]
    InvalidConnectionString(#[from] ConnectionStringError),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SettingsModel {
    #[serde(rename = "AzureTableStorage", default)]
    pub azure_table_storage: AzureTableStorageSettings,
    #[serde(rename = "SampleTableName", default = "default_sample_table_name")]
    pub sample_table_name: String,
    #[serde(rename = "Heartbeat", default)]
    pub heartbeat: HeartbeatSettings,
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self {
            azure_table_storage: AzureTableStorageSettings::default(),
            sample_table_name: default_sample_table_name(),
            heartbeat: HeartbeatSettings::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AzureTableStorageSettings {
    #[serde(rename = "ConnectionString", default)]
    pub connection_string: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HeartbeatSettings {
    #[serde(rename = "IntervalSeconds", default = "default_heartbeat_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for HeartbeatSettings {
    fn default() -> Self {
        Self {
            interval_seconds: default_heartbeat_interval_seconds(),
        }
    }
}

fn default_sample_table_name() -> String {
    SAMPLE_TABLE_NAME.to_string()
}

fn default_heartbeat_interval_seconds() -> u64 {
    5
}

impl HeartbeatSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

impl SettingsModel {
    pub fn from_yaml(src: &str) -> Result<Self, SettingsError> {
        if src.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(src)?)
    }

    /// Reads the YAML file when present and applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let mut settings = if path.exists() {
            let src = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_yaml(&src)?
        } else {
            tracing::warn!(path = %path.display(), "Settings file not found, using environment only");
            Self::from_yaml("")?
        };

        settings.apply_overrides(|key| std::env::var(key).ok());

        Ok(settings)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(connection_string) = lookup(CONNECTION_STRING_ENV) {
            self.azure_table_storage.connection_string = Some(connection_string);
        }
    }

    pub fn connection_string(&self) -> Result<ConnectionString, SettingsError> {
        let raw = self
            .azure_table_storage
            .connection_string
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(SettingsError::MissingConnectionString)?;

        Ok(ConnectionString::parse(raw)?)
    }
}
