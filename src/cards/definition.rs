//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: "Strike" costs
//! 1 and deals 6 damage no matter how many copies are in the deck. One
//! definition is shared by every `CardInstance` created from it.
//!
//! Instance-specific data (play count, cost modifiers) lives in
//! `CardInstance`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::keywords::{CardKeywords, CardType, TargetKind};

/// Stable handle of a card definition inside a `CardRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_deckbuilder::cards::{CardDefinition, CardId, CardKeywords};
///
/// let offering = CardDefinition::new(CardId::new(1), "offering", "Offering")
///     .with_cost(0)
///     .with_keywords(CardKeywords::EXHAUST)
///     .with_value("energy", 2);
///
/// assert!(offering.is_exhaust());
/// assert_eq!(offering.value("energy", 0), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Arena handle.
    pub id: CardId,

    /// Unique string identifier (content key).
    pub key: String,

    /// Display name.
    pub name: String,

    pub card_type: CardType,

    /// Energy cost before modifiers.
    pub base_cost: u32,

    pub keywords: CardKeywords,

    pub target: TargetKind,

    /// Named numbers the game's effects read (damage, block, draw, ...).
    #[serde(default)]
    pub values: FxHashMap<String, i64>,
}

impl CardDefinition {
    /// Create a 0-cost attack with no keywords.
    #[must_use]
    pub fn new(id: CardId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            card_type: CardType::default(),
            base_cost: 0,
            keywords: CardKeywords::empty(),
            target: TargetKind::default(),
            values: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.base_cost = cost;
        self
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    /// Add keywords to the existing set.
    #[must_use]
    pub fn with_keywords(mut self, keywords: CardKeywords) -> Self {
        self.keywords |= keywords;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    /// Set a named value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Get a named value with a default.
    #[must_use]
    pub fn value(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: CardKeywords) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.has_keyword(CardKeywords::UNPLAYABLE)
    }

    #[must_use]
    pub fn is_exhaust(&self) -> bool {
        self.has_keyword(CardKeywords::EXHAUST)
    }
}
