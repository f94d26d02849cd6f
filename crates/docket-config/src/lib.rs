//! # docket-config
//!
//! Layered configuration loading for Docket using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DOCKET_*` prefix, `__` as separator)
//! 2. An explicit file passed by the caller (`docket --config <PATH>`)
//! 3. Project-level `.docket/config.toml`
//! 4. User-level `~/.config/docket/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DOCKET_CACHE__CAPACITY` -> `cache.capacity` and
//! `DOCKET_PARSER__MAX_SIGNATURE_LINES` -> `parser.max_signature_lines`.
//!
//! # Usage
//!
//! ```no_run
//! use docket_config::DocketConfig;
//!
//! let config = DocketConfig::load_with_dotenv().expect("config");
//! println!("cache capacity: {}", config.cache.capacity);
//! ```

mod cache;
mod error;
mod parser;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use parser::ParserConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocketConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

impl DocketConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load), with `explicit` merged above the project file.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` first, then every other source.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(None)
    }

    /// [`load_with_dotenv`](Self::load_with_dotenv) plus an explicit file.
    pub fn load_with_dotenv_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load_from(explicit)
    }

    /// The provider chain without an explicit file.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// The provider chain, public so tests can inspect it or layer on top.
    pub fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".docket/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("DOCKET_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()?;
        self.parser.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docket").join("config.toml"))
    }
}
