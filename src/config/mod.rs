//! Run configuration.
//!
//! Defaults for generation and prompting, overridable with `RINGKAS_*`
//! environment variables. The CLI layers its flags on top of this; library
//! components take explicit values, never global state.

pub mod error;


pub use error::ConfigError;

use std::env;

use crate::prompt::PromptTemplate;

/// Run-level defaults loaded from the environment.
///
/// Use [`Config::from_env`] to read `RINGKAS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prompt template used when the CLI does not specify one. Default: mistral.
    pub default_template: PromptTemplate,

    /// Token budget for a generated summary. Default: `128`.
    pub max_new_tokens: usize,

    /// Sampling temperature. Default: `0.7`.
    pub temperature: f64,

    /// Nucleus sampling cutoff. Default: `0.9`.
    pub top_p: f64,

    /// Top-k sampling cutoff. Default: `50`.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_template: PromptTemplate::Mistral,
            max_new_tokens: 128,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
        }
    }
}

impl Config {
    const ENV_TEMPLATE: &'static str = "RINGKAS_TEMPLATE";
    const ENV_MAX_NEW_TOKENS: &'static str = "RINGKAS_MAX_NEW_TOKENS";
    const ENV_TEMPERATURE: &'static str = "RINGKAS_TEMPERATURE";
    const ENV_TOP_P: &'static str = "RINGKAS_TOP_P";
    const ENV_TOP_K: &'static str = "RINGKAS_TOP_K";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_template = match env::var(Self::ENV_TEMPLATE) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.default_template,
        };

        Ok(Self {
            default_template,
            max_new_tokens: Self::parse_from_env(Self::ENV_MAX_NEW_TOKENS, defaults.max_new_tokens)?,
            temperature: Self::parse_from_env(Self::ENV_TEMPERATURE, defaults.temperature)?,
            top_p: Self::parse_from_env(Self::ENV_TOP_P, defaults.top_p)?,
            top_k: Self::parse_from_env(Self::ENV_TOP_K, defaults.top_k)?,
        })
    }

    fn parse_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                name,
                value,
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    }
}
