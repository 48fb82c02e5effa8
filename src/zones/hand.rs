//! The hand: cards currently available to play.

use serde::{Deserialize, Serialize};

use super::pile::CardPile;
use crate::cards::CardInstance;
use crate::core::entity::EntityId;

/// Indexable collection of cards in hand.
///
/// `max_size` is advisory: `is_full` reports it, but `add` always succeeds.
/// Whether to stop drawing at the limit is a game decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardInstance>,
    max_size: usize,
}

impl Default for Hand {
    fn default() -> Self {
        Self::with_max_size(10)
    }
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            cards: Vec::new(),
            max_size,
        }
    }

    /// Append a card.
    pub fn add(&mut self, card: CardInstance) {
        debug_assert!(
            !self.contains(card.entity_id),
            "{} is already in hand",
            card.entity_id
        );
        self.cards.push(card);
    }

    /// Remove a card by identity. `None` means it is not in hand.
    pub fn remove(&mut self, id: EntityId) -> Option<CardInstance> {
        let idx = self.position(id)?;
        Some(self.cards.remove(idx))
    }

    /// Move a card from the hand onto the top of `pile` in one step.
    ///
    /// Returns `false` (and touches nothing) if the card is not in hand.
    pub fn discard_to(&mut self, id: EntityId, pile: &mut CardPile) -> bool {
        match self.remove(id) {
            Some(card) => {
                pile.push_top(card);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&CardInstance> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.entity_id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.entity_id == id)
    }

    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.cards.iter().position(|c| c.entity_id == id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    /// Empty the hand, returning cards in hand order.
    pub fn take_all(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    /// At or above the advisory limit?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.max_size
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.cards.iter().map(|c| c.entity_id).collect()
    }
}
