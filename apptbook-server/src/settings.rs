//! Server configuration.
//!
//! Sources, later ones winning: built-in defaults, the TOML file at
//! `~/.config/apptbook/server.toml` (or `$APPTBOOK_CONFIG`), then
//! `APPTBOOK_*` environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apptbook_core::{SEED_OWNER, TimeCodec};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "APPTBOOK";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4097
}

fn default_seed_owner() -> String {
    SEED_OWNER.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// IANA zone name; the system zone when unset
    pub time_zone: Option<String>,

    #[serde(default = "default_seed_owner")]
    pub seed_owner: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("APPTBOOK_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("apptbook");

        Ok(config_dir.join("server.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let builder = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn codec(&self) -> Result<TimeCodec> {
        match &self.time_zone {
            Some(name) => TimeCodec::from_zone_name(name)
                .with_context(|| format!("Invalid time_zone in configuration: {name}")),
            None => Ok(TimeCodec::system_default()),
        }
    }
}
