//! Card registry: the arena of card definitions.
//!
//! Definitions are registered once at content-definition time and looked
//! up by `CardId` (or by string key) from then on. Decks hold the registry
//! behind an `Arc` so any number of instances can share it.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::error::DeckError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_deckbuilder::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), "strike", "Strike").with_cost(1))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Strike");
/// assert_eq!(registry.id_for_key("strike"), Some(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    keys: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Fails if the id or key is already taken.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, DeckError> {
        if self.cards.contains_key(&card.id) {
            return Err(DeckError::DuplicateCard(card.id));
        }
        if self.keys.contains_key(&card.key) {
            return Err(DeckError::DuplicateKey(card.key));
        }

        let id = card.id;
        self.next_id = self.next_id.max(id.raw().saturating_add(1));
        self.keys.insert(card.key.clone(), id);
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Register a card with the next free id.
    ///
    /// `build` receives the assigned id and returns the definition.
    pub fn register_auto<F>(&mut self, build: F) -> Result<CardId, DeckError>
    where
        F: FnOnce(CardId) -> CardDefinition,
    {
        let card = build(CardId::new(self.next_id));
        self.register(card)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by id, or `DeckError::UnknownCard`.
    pub fn require(&self, id: CardId) -> Result<&CardDefinition, DeckError> {
        self.get(id).ok_or(DeckError::UnknownCard(id))
    }

    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<&CardDefinition> {
        self.id_for_key(key).and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn id_for_key(&self, key: &str) -> Option<CardId> {
        self.keys.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}
