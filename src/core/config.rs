//! Deckbuilder configuration.
//!
//! Games configure the turn engine at startup with a `DeckbuilderConfig`:
//! energy budget, hand sizes and the shuffle seed. Every field has a
//! default, so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};

use super::error::DeckError;

/// Startup configuration for a `DeckbuilderTemplate`.
///
/// ## Example
///
/// ```
/// use rust_deckbuilder::core::DeckbuilderConfig;
///
/// let config = DeckbuilderConfig::from_json(r#"{ "max_energy": 4 }"#).unwrap();
/// assert_eq!(config.max_energy, 4);
/// assert_eq!(config.base_hand_size, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckbuilderConfig {
    /// Energy restored at the start of each turn by the default policy.
    pub max_energy: u32,

    /// Cards drawn at the start of each turn by the default policy.
    pub base_hand_size: usize,

    /// Advisory hand limit. Reported by `Hand::is_full`, never enforced.
    pub max_hand_size: usize,

    /// Seed for the deck's shuffle stream.
    pub seed: u64,
}

impl Default for DeckbuilderConfig {
    fn default() -> Self {
        Self {
            max_energy: 3,
            base_hand_size: 5,
            max_hand_size: 10,
            seed: 0,
        }
    }
}

impl DeckbuilderConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        serde_json::from_str(json).map_err(|e| DeckError::InvalidConfig(e.to_string()))
    }

    #[must_use]
    pub fn with_max_energy(mut self, energy: u32) -> Self {
        self.max_energy = energy;
        self
    }

    #[must_use]
    pub fn with_base_hand_size(mut self, size: usize) -> Self {
        self.base_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
