//! Deck definitions - the list of cards a deck starts with.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardRegistry};
use crate::core::error::DeckError;

/// A card and how many copies of it a deck contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    pub count: u32,
}

/// Recipe for building a `DeckInstance`.
///
/// ```
/// use rust_deckbuilder::cards::CardId;
/// use rust_deckbuilder::deck::DeckDefinition;
///
/// let deck = DeckDefinition::from_json(
///     r#"{ "name": "starter", "entries": [{ "card": 1, "count": 5 }, { "card": 2, "count": 4 }] }"#,
/// )
/// .unwrap();
///
/// assert_eq!(deck.total_cards(), 9);
/// assert_eq!(deck.entries[0].card, CardId::new(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDefinition {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<DeckEntry>,
}

impl DeckDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add `count` copies of a card (builder pattern).
    ///
    /// Repeated cards are merged into one entry.
    #[must_use]
    pub fn with_card(mut self, card: CardId, count: u32) -> Self {
        self.add(card, count);
        self
    }

    pub fn add(&mut self, card: CardId, count: u32) {
        match self.entries.iter_mut().find(|e| e.card == card) {
            Some(entry) => entry.count = entry.count.saturating_add(count),
            None => self.entries.push(DeckEntry { card, count }),
        }
    }

    /// Build from `(key, count)` pairs resolved against a registry.
    pub fn from_keys(
        name: impl Into<String>,
        cards: &[(&str, u32)],
        registry: &CardRegistry,
    ) -> Result<Self, DeckError> {
        let mut deck = Self::new(name);
        for &(key, count) in cards {
            let id = registry
                .id_for_key(key)
                .ok_or_else(|| DeckError::UnknownKey(key.to_string()))?;
            deck.add(id, count);
        }
        Ok(deck)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        serde_json::from_str(json).map_err(|e| DeckError::InvalidDeck(e.to_string()))
    }

    /// Total copies across all entries.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Check every entry refers to a registered card.
    pub fn validate(&self, registry: &CardRegistry) -> Result<(), DeckError> {
        for entry in &self.entries {
            registry.require(entry.card)?;
        }
        Ok(())
    }
}
