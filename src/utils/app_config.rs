//! Global application configuration.
//!
//! Layered configuration state: embedded defaults, then an optional user
//! configuration file, then environment variables and command-line flags.
//! The resolver core never reads from here; only the CLI shell does, and it
//! passes plain values down.

use std::path::Path;
use std::sync::RwLock;

use config::{Config, Environment, File, FileFormat};
use lazy_static::lazy_static;
use serde::Deserialize;

use super::error::{Error, Result};
use super::types::LogLevel;

lazy_static! {
    /// Global configuration state.
    pub static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub debug: bool,
    pub log_level: LogLevel,
    /// Review host used in rendered links, e.g. `github.com`.
    pub host: String,
    /// Default org/repo/branch for snapshots that do not name their own.
    pub org: String,
    pub repo: String,
    pub branch: String,
    /// Help page listing the bot commands.
    pub command_help_link: String,
    /// Documentation page for the review process.
    pub pr_process_link: String,
}

impl AppConfig {
    /// Initializes the configuration from the embedded defaults and the
    /// `APP_*` environment.
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();
        if let Some(contents) = default_config {
            builder = builder.add_source(File::from_str(contents, FileFormat::Toml));
        }
        builder = builder.add_source(Environment::with_prefix("APP"));
        Self::replace(builder.build()?)
    }

    /// Layers a user-supplied configuration file on top of the current state.
    pub fn merge_config(config_file: Option<&Path>) -> Result<()> {
        let Some(path) = config_file else {
            return Ok(());
        };
        let merged = Config::builder()
            .add_source(Self::snapshot()?)
            .add_source(File::from(path.to_path_buf()))
            .build()?;
        Self::replace(merged)
    }

    /// Folds the global command-line flags into the configuration.
    pub fn merge_args(args: clap::ArgMatches) -> Result<()> {
        if let Some(debug) = args.get_one::<bool>("debug") {
            Self::set("debug", &debug.to_string())?;
        }
        if let Some(log_level) = args.get_one::<LogLevel>("log_level") {
            Self::set("log_level", &log_level.to_string())?;
        }
        Ok(())
    }

    /// Overrides a single key.
    pub fn set(key: &str, value: &str) -> Result<()> {
        let merged = Config::builder()
            .add_source(Self::snapshot()?)
            .set_override(key, value)?
            .build()?;
        Self::replace(merged)
    }

    /// Reads a single typed value.
    pub fn get<'de, T: Deserialize<'de>>(key: &str) -> Result<T> {
        Ok(Self::snapshot()?.get::<T>(key)?)
    }

    /// Deserializes the whole configuration.
    pub fn fetch() -> Result<AppConfig> {
        Ok(Self::snapshot()?.try_deserialize()?)
    }

    fn snapshot() -> Result<Config> {
        Ok(CONFIG
            .read()
            .map_err(|_| Error::new("Configuration lock poisoned"))?
            .clone())
    }

    fn replace(settings: Config) -> Result<()> {
        let mut current = CONFIG
            .write()
            .map_err(|_| Error::new("Configuration lock poisoned"))?;
        *current = settings;
        Ok(())
    }
}
