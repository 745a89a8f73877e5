//! Application configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults,
//! 2. an optional YAML file,
//! 3. `BACKOFFICE_*` environment variables,
//! 4. command-line flags (applied by the CLI).
//!
//! Environment access goes through [`EnvReader`] so tests can supply
//! variables without touching the process environment.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::OutputMode;

pub const ENV_USERS_PAGE_SIZE: &str = "BACKOFFICE_USERS_PAGE_SIZE";
pub const ENV_PRODUCTS_PAGE_SIZE: &str = "BACKOFFICE_PRODUCTS_PAGE_SIZE";
pub const ENV_LATENCY_SCALE: &str = "BACKOFFICE_LATENCY_SCALE";
pub const ENV_THEME: &str = "BACKOFFICE_THEME";
pub const ENV_OUTPUT: &str = "BACKOFFICE_OUTPUT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value '{value}' for {name}: {reason}")]
    Env {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    ZeroPageSize(&'static str),
}

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Colour scheme for styled terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err("expected 'light' or 'dark'".to_string()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub users_page_size: usize,
    pub products_page_size: usize,
    /// Multiplier on simulated service latency; 0 disables it.
    pub latency_scale: f64,
    pub theme: Theme,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            users_page_size: 10,
            products_page_size: 12,
            latency_scale: 1.0,
            theme: Theme::Light,
            output: OutputMode::Auto,
        }
    }
}

impl Config {
    /// Defaults, then the file at `path` if given, then the environment.
    pub fn load(path: Option<&Path>, env: &dyn EnvReader) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Config, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn apply_env(&mut self, env: &dyn EnvReader) -> Result<(), ConfigError> {
        if let Some(v) = env_value(env, ENV_USERS_PAGE_SIZE)? {
            self.users_page_size = v;
        }
        if let Some(v) = env_value(env, ENV_PRODUCTS_PAGE_SIZE)? {
            self.products_page_size = v;
        }
        if let Some(v) = env_value(env, ENV_LATENCY_SCALE)? {
            self.latency_scale = v;
        }
        if let Some(v) = env_value(env, ENV_THEME)? {
            self.theme = v;
        }
        if let Some(v) = env_value(env, ENV_OUTPUT)? {
            self.output = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("users_page_size"));
        }
        if self.products_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("products_page_size"));
        }
        Ok(())
    }
}

/// Reads and parses one variable; blank values are ignored.
fn env_value<T>(env: &dyn EnvReader, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(raw) = env.var(name) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|e: T::Err| ConfigError::Env {
        name,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
