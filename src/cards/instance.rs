//! Card instances - runtime card state.
//!
//! A `CardInstance` is one physical copy of a card in a deck. It is owned by
//! exactly one zone at a time and moves between zones by value, so it can
//! never be in two places at once.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardId;
use crate::core::entity::EntityId;

/// How long a cost modifier lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierDuration {
    /// Until the card leaves the deck.
    Permanent,
    /// Cleared at end of turn.
    ThisTurn,
    /// Consumed by the next successful play.
    NextPlay,
}

/// Signed adjustment to a card's cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostModifier {
    pub amount: i32,
    pub duration: ModifierDuration,
}

impl CostModifier {
    #[must_use]
    pub const fn new(amount: i32, duration: ModifierDuration) -> Self {
        Self { amount, duration }
    }
}

/// A card in a deck.
///
/// ## State Values (i64 only)
///
/// `state` holds game-specific per-copy counters (e.g. a card that grows
/// each time it is played). Booleans are stored as 0/1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id within the owning deck.
    pub entity_id: EntityId,

    /// Definition this copy was created from.
    pub card_id: CardId,

    /// Successful plays of this copy.
    pub play_count: u32,

    /// Active cost adjustments.
    #[serde(default)]
    pub cost_modifiers: SmallVec<[CostModifier; 2]>,

    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

impl CardInstance {
    #[must_use]
    pub fn new(entity_id: EntityId, card_id: CardId) -> Self {
        Self {
            entity_id,
            card_id,
            play_count: 0,
            cost_modifiers: SmallVec::new(),
            state: FxHashMap::default(),
        }
    }

    /// Cost after modifiers, floored at zero.
    ///
    /// ```
    /// use rust_deckbuilder::cards::{CardId, CardInstance, ModifierDuration};
    /// use rust_deckbuilder::core::EntityId;
    ///
    /// let mut card = CardInstance::new(EntityId(1), CardId::new(0));
    /// card.add_cost_modifier(-3, ModifierDuration::ThisTurn);
    /// assert_eq!(card.effective_cost(2), 0);
    /// ```
    #[must_use]
    pub fn effective_cost(&self, base_cost: u32) -> u32 {
        let delta: i64 = self.cost_modifiers.iter().map(|m| i64::from(m.amount)).sum();
        let cost = i64::from(base_cost) + delta;
        u32::try_from(cost.max(0)).unwrap_or(u32::MAX)
    }

    pub fn add_cost_modifier(&mut self, amount: i32, duration: ModifierDuration) {
        self.cost_modifiers.push(CostModifier::new(amount, duration));
    }

    /// Drop every modifier with the given duration.
    pub fn clear_modifiers(&mut self, duration: ModifierDuration) {
        self.cost_modifiers.retain(|m| m.duration != duration);
    }

    /// Bookkeeping after a successful play.
    pub(crate) fn record_play(&mut self) {
        self.play_count += 1;
        self.clear_modifiers(ModifierDuration::NextPlay);
    }

    /// Get a state value with a default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }

    /// Modify a state value by delta.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        *self.state.entry(key.to_string()).or_insert(0) += delta;
    }
}
