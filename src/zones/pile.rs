//! Ordered card piles (draw, discard, exhaust).
//!
//! A `CardPile` owns its cards. The last element of the backing `Vec` is the
//! top of the pile, so push/pop at the top are O(1).

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of pile (drawn next).
    Top,
    /// Add to bottom of pile.
    Bottom,
    /// Insert at specific index (0 = bottom), clamped to the pile size.
    Index(usize),
    /// Insert at a uniformly random position.
    Random,
}

/// Ordered stack of card instances.
///
/// ## Usage
///
/// ```
/// use rust_deckbuilder::cards::{CardId, CardInstance};
/// use rust_deckbuilder::core::EntityId;
/// use rust_deckbuilder::zones::CardPile;
///
/// let mut pile = CardPile::new();
/// pile.push_top(CardInstance::new(EntityId(1), CardId::new(0)));
/// pile.push_top(CardInstance::new(EntityId(2), CardId::new(0)));
///
/// assert_eq!(pile.peek_top().unwrap().entity_id, EntityId(2));
/// assert_eq!(pile.pop_top().unwrap().entity_id, EntityId(2));
/// assert_eq!(pile.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPile {
    /// Bottom to top.
    cards: Vec<CardInstance>,
}

impl CardPile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from cards listed bottom to top.
    #[must_use]
    pub fn from_cards(cards: Vec<CardInstance>) -> Self {
        Self { cards }
    }

    /// Add a card to the top.
    pub fn push_top(&mut self, card: CardInstance) {
        debug_assert!(
            !self.contains(card.entity_id),
            "{} is already in this pile",
            card.entity_id
        );
        self.cards.push(card);
    }

    /// Add a card to the bottom.
    pub fn push_bottom(&mut self, card: CardInstance) {
        self.insert(card, ZonePosition::Index(0), None);
    }

    /// Insert a card at a position.
    ///
    /// `ZonePosition::Random` needs an RNG; without one it falls back to the
    /// top of the pile.
    pub fn insert(&mut self, card: CardInstance, position: ZonePosition, rng: Option<&mut GameRng>) {
        debug_assert!(
            !self.contains(card.entity_id),
            "{} is already in this pile",
            card.entity_id
        );
        let len = self.cards.len();
        let idx = match position {
            ZonePosition::Top => len,
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) => i.min(len),
            ZonePosition::Random => rng.map_or(len, |r| r.index_inclusive(len)),
        };
        self.cards.insert(idx, card);
    }

    /// Remove and return the top card. `None` means the pile is empty.
    pub fn pop_top(&mut self) -> Option<CardInstance> {
        self.cards.pop()
    }

    /// Remove and return the bottom card.
    pub fn pop_bottom(&mut self) -> Option<CardInstance> {
        if self.cards.is_empty() {
            return None;
        }
        Some(self.cards.remove(0))
    }

    #[must_use]
    pub fn peek_top(&self) -> Option<&CardInstance> {
        self.cards.last()
    }

    /// Up to `n` cards from the top, top first.
    pub fn peek_n(&self, n: usize) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter().rev().take(n)
    }

    /// Remove a specific card wherever it sits.
    pub fn remove(&mut self, id: EntityId) -> Option<CardInstance> {
        let idx = self.position(id)?;
        Some(self.cards.remove(idx))
    }

    /// Index of a card (0 = bottom).
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.cards.iter().position(|c| c.entity_id == id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.entity_id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.entity_id == id)
    }

    /// Randomize order. Every permutation is equally likely.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Move every card out, leaving the pile empty. Order is bottom to top.
    pub fn take_all(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }

    /// Move every card of `other` onto the top of this pile.
    pub fn append(&mut self, other: &mut CardPile) {
        self.cards.append(&mut other.cards);
    }

    /// Stable reorder, keeping cards that match `on_top` above the rest.
    pub(crate) fn lift_to_top<F>(&mut self, on_top: F)
    where
        F: Fn(&CardInstance) -> bool,
    {
        // sort_by_key is stable; `false` sorts before `true`.
        self.cards.sort_by_key(|c| on_top(c));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }

    /// Entity ids bottom to top.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.cards.iter().map(|c| c.entity_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn card(id: u32) -> CardInstance {
        CardInstance::new(EntityId(id), CardId::new(0))
    }

    fn pile_of(ids: std::ops::Range<u32>) -> CardPile {
        CardPile::from_cards(ids.map(card).collect())
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut pile = CardPile::new();
        pile.push_top(card(10));
        pile.push_top(card(11));

        assert_eq!(pile.pop_top().unwrap().entity_id, EntityId(11));
        assert_eq!(pile.pop_top().unwrap().entity_id, EntityId(10));
        assert!(pile.pop_top().is_none());
    }

    #[test]
    fn test_positions() {
        let mut pile = CardPile::new();
        pile.insert(card(10), ZonePosition::Top, None);
        pile.insert(card(11), ZonePosition::Bottom, None);
        pile.insert(card(12), ZonePosition::Top, None);
        pile.insert(card(13), ZonePosition::Index(1), None);

        assert_eq!(pile.ids(), vec![EntityId(11), EntityId(13), EntityId(10), EntityId(12)]);
        assert_eq!(pile.peek_top().unwrap().entity_id, EntityId(12));
        assert_eq!(pile.pop_bottom().unwrap().entity_id, EntityId(11));
    }

    #[test]
    fn test_index_position_clamps() {
        let mut pile = pile_of(0..2);
        pile.insert(card(9), ZonePosition::Index(50), None);
        assert_eq!(pile.peek_top().unwrap().entity_id, EntityId(9));
    }

    #[test]
    fn test_random_insert_keeps_all_cards() {
        let mut rng = GameRng::new(5);
        let mut pile = pile_of(0..5);
        pile.insert(card(99), ZonePosition::Random, Some(&mut rng));

        assert_eq!(pile.len(), 6);
        assert!(pile.contains(EntityId(99)));
    }

    #[test]
    fn test_peek_n_is_top_first() {
        let pile = pile_of(0..5);
        let top: Vec<_> = pile.peek_n(2).map(|c| c.entity_id).collect();
        assert_eq!(top, vec![EntityId(4), EntityId(3)]);
        assert_eq!(pile.peek_n(10).count(), 5);
    }

    #[test]
    fn test_remove_by_id() {
        let mut pile = pile_of(0..3);
        assert_eq!(pile.remove(EntityId(1)).unwrap().entity_id, EntityId(1));
        assert!(pile.remove(EntityId(1)).is_none());
        assert_eq!(pile.ids(), vec![EntityId(0), EntityId(2)]);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut pile = pile_of(0..20);
        let before = pile.ids();

        let mut rng = GameRng::new(42);
        pile.shuffle(&mut rng);

        let mut after = pile.ids();
        assert_ne!(before, after);
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_take_all_and_append() {
        let mut a = pile_of(0..3);
        let mut b = pile_of(3..5);

        a.append(&mut b);
        assert!(b.is_empty());
        assert_eq!(a.len(), 5);

        let all = a.take_all();
        assert_eq!(all.len(), 5);
        assert!(a.is_empty());
    }

    #[test]
    fn test_lift_to_top_is_stable() {
        let mut pile = pile_of(0..5);
        pile.lift_to_top(|c| c.entity_id == EntityId(1) || c.entity_id == EntityId(3));
        assert_eq!(
            pile.ids(),
            vec![EntityId(0), EntityId(2), EntityId(4), EntityId(1), EntityId(3)]
        );
    }

    #[test]
    fn test_get_mut() {
        let mut pile = pile_of(0..2);
        pile.get_mut(EntityId(1)).unwrap().play_count = 3;
        assert_eq!(pile.get(EntityId(1)).unwrap().play_count, 3);
        assert!(pile.get_mut(EntityId(7)).is_none());
    }
}
