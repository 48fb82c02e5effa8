//! Turn engine state shared between the template and its rules.
//!
//! `DeckbuilderCore` holds everything except the policy object: energy,
//! turn counter, the deck, the hook sink and signal subscribers. Policies
//! receive it directly, so an effect that draws cards or gains energy goes
//! through the same hooked paths as the template itself.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cards::{CardDefinition, CardInstance, CardRegistry};
use crate::core::config::DeckbuilderConfig;
use crate::core::entity::EntityId;
use crate::deck::{DeckHooks, DeckInstance, DeckMixin};

use super::events::{Signals, SubscriptionId, TemplateEvent};

/// Where the turn state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Before the first `start_turn`.
    Idle,
    /// Cards may be played.
    PlayerTurn,
    /// After `end_turn`, before the next `start_turn`.
    NotPlayerTurn,
}

/// Energy, turn and deck state.
pub struct DeckbuilderCore {
    config: DeckbuilderConfig,
    registry: Arc<CardRegistry>,
    deck: Option<DeckInstance>,
    current_energy: u32,
    max_energy: u32,
    base_hand_size: usize,
    current_turn: u32,
    is_player_turn: bool,
    hooks: Box<dyn DeckHooks>,
    signals: Signals,
}

impl DeckbuilderCore {
    pub(crate) fn new(
        config: DeckbuilderConfig,
        registry: Arc<CardRegistry>,
        hooks: Box<dyn DeckHooks>,
    ) -> Self {
        Self {
            max_energy: config.max_energy,
            base_hand_size: config.base_hand_size,
            config,
            registry,
            deck: None,
            current_energy: 0,
            current_turn: 0,
            is_player_turn: false,
            hooks,
            signals: Signals::new(),
        }
    }

    pub(crate) fn install_deck(&mut self, mut deck: DeckInstance) {
        deck.set_hand_limit(self.config.max_hand_size);
        self.deck = Some(deck);
    }

    // === Properties ===

    #[must_use]
    pub fn config(&self) -> &DeckbuilderConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn current_energy(&self) -> u32 {
        self.current_energy
    }

    #[must_use]
    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn set_max_energy(&mut self, max_energy: u32) {
        self.max_energy = max_energy;
    }

    #[must_use]
    pub fn base_hand_size(&self) -> usize {
        self.base_hand_size
    }

    pub fn set_base_hand_size(&mut self, size: usize) {
        self.base_hand_size = size;
    }

    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.is_player_turn
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.is_player_turn {
            TurnPhase::PlayerTurn
        } else if self.current_turn == 0 {
            TurnPhase::Idle
        } else {
            TurnPhase::NotPlayerTurn
        }
    }

    /// Definition of a card in the deck.
    #[must_use]
    pub fn card_definition(&self, card: EntityId) -> Option<&CardDefinition> {
        self.deck.as_ref()?.definition_of(card)
    }

    // === Energy ===

    /// Deduct energy. Refuses (returning `false`, changing nothing) if
    /// `amount` exceeds the current energy.
    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if amount > self.current_energy {
            trace!(amount, available = self.current_energy, "energy spend refused");
            return false;
        }
        self.set_energy(self.current_energy - amount);
        true
    }

    /// Add energy. Always succeeds; may exceed `max_energy`.
    pub fn gain_energy(&mut self, amount: u32) {
        self.set_energy(self.current_energy.saturating_add(amount));
    }

    /// Set energy, notifying subscribers if the value changed.
    pub(crate) fn set_energy(&mut self, value: u32) {
        let old = self.current_energy;
        if old == value {
            return;
        }
        self.current_energy = value;
        trace!(old, new = value, "energy changed");
        self.signals.emit(&TemplateEvent::EnergyChanged { old, new: value });
    }

    // === Zone transitions ===

    /// Draw up to `count` cards, firing hooks for each. Returns how many
    /// were actually drawn.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        let Some(deck) = self.deck.as_mut() else {
            warn!(count, "draw requested without a deck");
            return 0;
        };

        let mut drawn = 0;
        for _ in 0..count {
            let Some(draw) = deck.draw_one() else {
                debug!(requested = count, drawn, "no cards left to draw");
                break;
            };
            if draw.reshuffled {
                self.hooks.on_deck_shuffled();
            }
            if let Some(card) = deck.hand().get(draw.card) {
                self.hooks.on_card_drawn(card);
            }
            drawn += 1;
        }
        drawn
    }

    /// Move a card from hand to the discard pile, firing `on_card_discarded`.
    pub fn discard_card(&mut self, card: EntityId) -> bool {
        let Some(deck) = self.deck.as_mut() else {
            return false;
        };
        if !deck.discard_from_hand(card) {
            return false;
        }
        if let Some(instance) = deck.discard_pile().peek_top() {
            self.hooks.on_card_discarded(instance);
        }
        true
    }

    /// Move a card from hand to the exhaust pile, firing `on_card_exhausted`.
    pub fn exhaust_card(&mut self, card: EntityId) -> bool {
        let Some(deck) = self.deck.as_mut() else {
            return false;
        };
        if !deck.exhaust_from_hand(card) {
            return false;
        }
        if let Some(instance) = deck.exhaust_pile().peek_top() {
            self.hooks.on_card_exhausted(instance);
        }
        true
    }

    // === Turn bookkeeping (driven by the template) ===

    pub(crate) fn begin_turn(&mut self) -> u32 {
        self.current_turn += 1;
        self.is_player_turn = true;
        self.current_turn
    }

    pub(crate) fn finish_turn(&mut self) {
        self.is_player_turn = false;
    }

    pub(crate) fn rewind(&mut self) {
        self.current_turn = 0;
        self.is_player_turn = false;
    }

    pub(crate) fn notify_turn_started(&mut self, turn: u32) {
        self.hooks.on_turn_started(turn);
        self.signals.emit(&TemplateEvent::TurnStarted { turn });
    }

    pub(crate) fn notify_turn_ended(&mut self, turn: u32) {
        self.hooks.on_turn_ended(turn);
        self.signals.emit(&TemplateEvent::TurnEnded { turn });
    }

    /// Fire `on_card_played` and `CardPlayed`. `detached` stands in for a
    /// card that is no longer in the deck.
    pub(crate) fn notify_card_played(
        &mut self,
        card: EntityId,
        target: Option<EntityId>,
        detached: Option<&CardInstance>,
    ) {
        let instance = self.deck.as_ref().and_then(|d| d.card(card)).or(detached);
        if let Some(instance) = instance {
            self.hooks.on_card_played(instance, target);
        }
        self.signals.emit(&TemplateEvent::CardPlayed { card, target });
    }

    // === Signals ===

    pub fn connect<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TemplateEvent) + 'static,
    {
        self.signals.connect(callback)
    }

    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        self.signals.disconnect(id)
    }
}

impl DeckMixin for DeckbuilderCore {
    fn deck_instance(&self) -> Option<&DeckInstance> {
        self.deck.as_ref()
    }

    fn deck_instance_mut(&mut self) -> Option<&mut DeckInstance> {
        self.deck.as_mut()
    }

    fn hand_size(&self) -> usize {
        self.base_hand_size
    }
}

impl std::fmt::Debug for DeckbuilderCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckbuilderCore")
            .field("current_energy", &self.current_energy)
            .field("max_energy", &self.max_energy)
            .field("base_hand_size", &self.base_hand_size)
            .field("current_turn", &self.current_turn)
            .field("is_player_turn", &self.is_player_turn)
            .field("deck", &self.deck.as_ref().map(DeckInstance::name))
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}
