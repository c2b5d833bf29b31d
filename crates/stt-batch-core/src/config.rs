//! Service credentials loaded from an env file.
//!
//! The env file holds flat `KEY=VALUE` lines. A variable that is already set
//! in the process environment takes precedence over the file, the same rule
//! `dotenvy::from_path` applies. This module is the only place that reads the
//! process environment; everything downstream receives a [`Config`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Keys every env file must define
pub const REQUIRED_KEYS: [&str; 4] = ["api_key", "api_url", "base_lang", "custom_id"];

/// Validated key/value pairs, one entry per required key
pub type EnvMap = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The value of '{key}' is empty.")]
    MissingValue { key: String },
    #[error("Repeated key: '{key}'.")]
    DuplicateKey { key: String },
    #[error("Failed to read env file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load `keys` from the env file at `path`.
///
/// Process environment variables win over the file's values.
pub fn load_env(path: &Path, keys: &[&str]) -> Result<EnvMap, ConfigError> {
    load_env_with(path, keys, |key| std::env::var(key).ok())
}

/// Like [`load_env`], with `lookup` standing in for the process environment.
pub fn load_env_with<F>(path: &Path, keys: &[&str], lookup: F) -> Result<EnvMap, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_vars = read_env_file(path)?;
    resolve_keys(keys, |key| {
        lookup(key).or_else(|| file_vars.get(key).cloned())
    })
}

/// Validate the required `keys` against a lookup function.
///
/// Keys are checked in order. An absent or empty value fails with
/// [`ConfigError::MissingValue`]; a key listed twice fails with
/// [`ConfigError::DuplicateKey`] on its second occurrence.
pub fn resolve_keys<F>(keys: &[&str], lookup: F) -> Result<EnvMap, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env = EnvMap::with_capacity(keys.len());

    for &key in keys {
        let value = match lookup(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                return Err(ConfigError::MissingValue {
                    key: key.to_string(),
                });
            }
        };

        if env.contains_key(key) {
            return Err(ConfigError::DuplicateKey {
                key: key.to_string(),
            });
        }
        env.insert(key.to_string(), value);
    }

    Ok(env)
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let mut vars = HashMap::new();
    let iter = dotenvy::from_path_iter(path).map_err(|source| read_error(path, source))?;

    for item in iter {
        let (key, value) = item.map_err(|source| read_error(path, source))?;
        // First definition wins, matching dotenv's no-override loading
        vars.entry(key).or_insert(value);
    }

    Ok(vars)
}

fn read_error(path: &Path, source: dotenvy::Error) -> ConfigError {
    ConfigError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Watson Speech to Text credentials and settings for one run
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// IBM Cloud API key, exchanged for IAM tokens
    pub api_key: String,
    /// Service instance URL
    pub api_url: String,
    /// Base language of the custom model
    pub base_lang: String,
    /// Custom language model identifier
    pub custom_id: String,
}

impl Config {
    /// Load and validate all [`REQUIRED_KEYS`] from the env file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_env(load_env(path, &REQUIRED_KEYS)?)
    }

    /// Build a config from an already validated map
    pub fn from_env(mut env: EnvMap) -> Result<Self, ConfigError> {
        let mut take = |key: &str| {
            env.remove(key).ok_or_else(|| ConfigError::MissingValue {
                key: key.to_string(),
            })
        };

        Ok(Self {
            api_key: take("api_key")?,
            api_url: take("api_url")?,
            base_lang: take("base_lang")?,
            custom_id: take("custom_id")?,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("base_lang", &self.base_lang)
            .field("custom_id", &self.custom_id)
            .finish()
    }
}
