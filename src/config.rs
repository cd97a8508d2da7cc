//! Configuration loaded from the environment

use crate::dialog::state::{DEFAULT_MAX_COUNT, DEFAULT_MIN_COUNT};
use crate::dialog::GameContext;
use crate::word_pool::{PoolError, WordPool, DEFAULT_VOCABULARY};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("Invalid game configuration: {0}")]
    Pool(#[from] PoolError),
}

/// Rules for the memorization game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub vocabulary: Vec<String>,
    pub min_count: usize,
    pub max_count: usize,
    /// Fixed seed for word selection
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| (*w).to_string()).collect(),
            min_count: DEFAULT_MIN_COUNT,
            max_count: DEFAULT_MAX_COUNT,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset variables keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let vocabulary = lookup("REMEMBER_ME_VOCABULARY")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.vocabulary);

        Ok(Self {
            vocabulary,
            min_count: parse_var(&lookup, "REMEMBER_ME_MIN_COUNT")?.unwrap_or(defaults.min_count),
            max_count: parse_var(&lookup, "REMEMBER_ME_MAX_COUNT")?.unwrap_or(defaults.max_count),
            seed: parse_var(&lookup, "REMEMBER_ME_SEED")?,
        })
    }

    /// Validate the rules and build the shared game context
    pub fn build_context(&self) -> Result<GameContext, ConfigError> {
        let pool = WordPool::new(self.vocabulary.iter().cloned(), self.max_count)?;
        Ok(GameContext::new(pool, self.min_count, self.max_count)?)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Only requests for this application are served when set
    pub application_id: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var(&lookup, "REMEMBER_ME_PORT")?.unwrap_or(DEFAULT_PORT),
            application_id: lookup("REMEMBER_ME_APPLICATION_ID").filter(|id| !id.trim().is_empty()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}
