/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer configuration.
//!
//! The item count is the only required parameter. Configuration can be built
//! in code, read from `INORDER_*` environment variables, or parsed from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the number of items.
pub const ENV_TOTAL_ITEMS: &str = "INORDER_TOTAL_ITEMS";

/// Environment variable enabling strict duplicate checking.
pub const ENV_STRICT_DUPLICATES: &str = "INORDER_STRICT_DUPLICATES";

/// Item count used when none is configured.
pub const DEFAULT_TOTAL_ITEMS: usize = 20;

/// Errors raised while loading a [`SequencerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
    },

    /// JSON input was malformed.
    #[error("invalid sequencer config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sequencer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Number of items; valid indices are `[0, total_items)`.
    pub total_items: usize,

    /// Reject repeated completions with an error instead of ignoring them.
    pub strict_duplicates: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            total_items: DEFAULT_TOTAL_ITEMS,
            strict_duplicates: false,
        }
    }
}

impl SequencerConfig {
    /// Creates a lenient configuration for `total_items` items.
    #[must_use]
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            strict_duplicates: false,
        }
    }

    /// Sets strict duplicate checking.
    #[must_use]
    pub fn with_strict_duplicates(mut self, strict: bool) -> Self {
        self.strict_duplicates = strict;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable is set but does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TOTAL_ITEMS) {
            config.total_items = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TOTAL_ITEMS,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_STRICT_DUPLICATES) {
            config.strict_duplicates = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: ENV_STRICT_DUPLICATES,
                        value: raw,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Parses configuration from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = SequencerConfig::default();
        assert_eq!(config.total_items, 20);
        assert!(!config.strict_duplicates);
    }

    #[test]
    fn test_lookup_uses_defaults_when_unset() {
        let config = SequencerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SequencerConfig::default());
    }

    #[test]
    fn test_lookup_reads_values() {
        let config = SequencerConfig::from_lookup(lookup_from(&[
            (ENV_TOTAL_ITEMS, " 64 "),
            (ENV_STRICT_DUPLICATES, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.total_items, 64);
        assert!(config.strict_duplicates);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = SequencerConfig::from_lookup(lookup_from(&[(ENV_TOTAL_ITEMS, "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: ENV_TOTAL_ITEMS, ref value } if value == "many"
        ));

        let err = SequencerConfig::from_lookup(lookup_from(&[(ENV_STRICT_DUPLICATES, "yes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: ENV_STRICT_DUPLICATES, .. }));
    }

    #[test]
    fn test_from_json_partial() {
        let config = SequencerConfig::from_json(r#"{ "total_items": 5 }"#).unwrap();
        assert_eq!(config.total_items, 5);
        assert!(!config.strict_duplicates);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = SequencerConfig::from_json("{ total_items: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
