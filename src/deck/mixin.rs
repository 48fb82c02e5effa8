//! Deck capability contracts.
//!
//! Deck awareness is split in two:
//!
//! - [`DeckMixin`]: "I have a deck" - accessor for the `DeckInstance` and
//!   the base hand size.
//! - [`DeckHooks`]: "tell me what happened" - lifecycle callbacks fired
//!   after each deck event has committed.
//!
//! Hooks observe; they cannot veto. By the time a hook runs, the card has
//! already moved. They also receive cards by shared reference, so they
//! cannot reach back into the deck mid-transition.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::EntityId;
use crate::zones::Zone;

use super::instance::DeckInstance;

/// Anything that owns a deck.
pub trait DeckMixin {
    /// The deck, if one has been created.
    fn deck_instance(&self) -> Option<&DeckInstance>;

    fn deck_instance_mut(&mut self) -> Option<&mut DeckInstance>;

    /// Cards drawn per turn by default.
    fn hand_size(&self) -> usize;

    fn has_deck(&self) -> bool {
        self.deck_instance().is_some()
    }

    /// Cards in a zone (0 without a deck).
    fn cards_in(&self, zone: Zone) -> usize {
        self.deck_instance().map_or(0, |deck| deck.count(zone))
    }
}

/// Lifecycle hook sink. Every method defaults to a no-op.
pub trait DeckHooks {
    /// A card moved from the draw pile to the hand.
    fn on_card_drawn(&mut self, _card: &CardInstance) {}

    /// A card's effect resolved. Fires before the card leaves the hand.
    fn on_card_played(&mut self, _card: &CardInstance, _target: Option<EntityId>) {}

    /// A card landed in the discard pile.
    fn on_card_discarded(&mut self, _card: &CardInstance) {}

    /// A card landed in the exhaust pile.
    fn on_card_exhausted(&mut self, _card: &CardInstance) {}

    /// The discard pile was shuffled back into the draw pile.
    fn on_deck_shuffled(&mut self) {}

    fn on_turn_started(&mut self, _turn: u32) {}

    fn on_turn_ended(&mut self, _turn: u32) {}
}

/// Hook sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl DeckHooks for NoHooks {}

/// One recorded hook invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookCall {
    Drawn(EntityId),
    Played {
        card: EntityId,
        target: Option<EntityId>,
    },
    Discarded(EntityId),
    Exhausted(EntityId),
    Shuffled,
    TurnStarted(u32),
    TurnEnded(u32),
}

/// Hook sink that appends every call to a shared log.
///
/// Clone it before handing it to a template; the clone shares the log.
///
/// ```
/// use rust_deckbuilder::deck::{DeckHooks, HookCall, RecordingHooks};
///
/// let hooks = RecordingHooks::new();
/// let mut sink = hooks.clone();
/// sink.on_turn_started(1);
///
/// assert_eq!(hooks.calls(), vec![HookCall::TurnStarted(1)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    log: Rc<RefCell<Vec<HookCall>>>,
}

impl RecordingHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HookCall> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn push(&self, call: HookCall) {
        self.log.borrow_mut().push(call);
    }
}

impl DeckHooks for RecordingHooks {
    fn on_card_drawn(&mut self, card: &CardInstance) {
        self.push(HookCall::Drawn(card.entity_id));
    }

    fn on_card_played(&mut self, card: &CardInstance, target: Option<EntityId>) {
        self.push(HookCall::Played {
            card: card.entity_id,
            target,
        });
    }

    fn on_card_discarded(&mut self, card: &CardInstance) {
        self.push(HookCall::Discarded(card.entity_id));
    }

    fn on_card_exhausted(&mut self, card: &CardInstance) {
        self.push(HookCall::Exhausted(card.entity_id));
    }

    fn on_deck_shuffled(&mut self) {
        self.push(HookCall::Shuffled);
    }

    fn on_turn_started(&mut self, turn: u32) {
        self.push(HookCall::TurnStarted(turn));
    }

    fn on_turn_ended(&mut self, turn: u32) {
        self.push(HookCall::TurnEnded(turn));
    }
}
