//! The deckbuilder template: turn, energy and play orchestration.
//!
//! Driven by an external game loop:
//!
//! ```text
//! start_turn ─▶ play_card* ─▶ end_turn ─▶ start_turn ─▶ ...
//! ```
//!
//! ## Play ordering
//!
//! Within a successful `play_card`, observers see:
//! energy spent → effect applied → play count incremented → played hook →
//! zone transition → discard/exhaust hook.
//!
//! A rejected play changes nothing. A play whose effect fails is rolled
//! back to exactly the pre-call energy with the card still in hand.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cards::{CardKeywords, CardRegistry};
use crate::core::config::DeckbuilderConfig;
use crate::core::entity::EntityId;
use crate::core::error::{DeckError, PlayError};
use crate::core::rng::GameRng;
use crate::deck::{DeckHooks, DeckInstance, DeckMixin, NoHooks};
use crate::rules::{DeckRules, DefaultRules};

use super::events::{SubscriptionId, TemplateEvent};
use super::state::{DeckbuilderCore, TurnPhase};

/// Deckbuilder turn engine.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_deckbuilder::cards::{CardDefinition, CardId, CardRegistry};
/// use rust_deckbuilder::core::DeckbuilderConfig;
/// use rust_deckbuilder::deck::DeckDefinition;
/// use rust_deckbuilder::rules::DefaultRules;
/// use rust_deckbuilder::template::DeckbuilderTemplate;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "strike", "Strike").with_cost(1)).unwrap();
///
/// let rules = DefaultRules::with_deck(DeckDefinition::new("starter").with_card(CardId::new(1), 10));
/// let mut game = DeckbuilderTemplate::new(DeckbuilderConfig::default(), Arc::new(registry), rules).unwrap();
///
/// game.start_turn();
/// assert_eq!(game.current_energy(), 3);
///
/// game.play_card_at(0, None).unwrap();
/// assert_eq!(game.current_energy(), 2);
///
/// assert!(game.end_turn());
/// assert!(!game.is_player_turn());
/// ```
pub struct DeckbuilderTemplate<R: DeckRules = DefaultRules> {
    core: DeckbuilderCore,
    rules: R,
}

impl<R: DeckRules> DeckbuilderTemplate<R> {
    /// Create a template without lifecycle hooks and run startup.
    pub fn new(
        config: DeckbuilderConfig,
        registry: Arc<CardRegistry>,
        rules: R,
    ) -> Result<Self, DeckError> {
        Self::with_hooks(config, registry, rules, Box::new(NoHooks))
    }

    /// Create a template with a hook sink and run startup.
    ///
    /// Startup asks the rules for a deck definition and, if one is given,
    /// builds the deck instance from it.
    pub fn with_hooks(
        config: DeckbuilderConfig,
        registry: Arc<CardRegistry>,
        rules: R,
        hooks: Box<dyn DeckHooks>,
    ) -> Result<Self, DeckError> {
        let mut template = Self {
            core: DeckbuilderCore::new(config, registry, hooks),
            rules,
        };
        template.startup()?;
        Ok(template)
    }

    fn startup(&mut self) -> Result<(), DeckError> {
        let Some(def) = self.rules.create_deck_def(self.core.registry()) else {
            warn!("rules supplied no deck definition; template has no deck");
            return Ok(());
        };

        let rng = GameRng::new(self.core.config().seed).for_context("deck");
        let registry = Arc::clone(self.core.registry());
        let deck = self.rules.create_deck_instance(&def, registry, rng)?;
        debug!(deck = %deck.name(), cards = deck.total_cards(), "deck instance created");
        self.core.install_deck(deck);
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn core(&self) -> &DeckbuilderCore {
        &self.core
    }

    /// Mutable core, for games that move cards or energy outside a play.
    pub fn core_mut(&mut self) -> &mut DeckbuilderCore {
        &mut self.core
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut R {
        &mut self.rules
    }

    #[must_use]
    pub fn current_energy(&self) -> u32 {
        self.core.current_energy()
    }

    #[must_use]
    pub fn max_energy(&self) -> u32 {
        self.core.max_energy()
    }

    pub fn set_max_energy(&mut self, max_energy: u32) {
        self.core.set_max_energy(max_energy);
    }

    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.core.current_turn()
    }

    #[must_use]
    pub fn base_hand_size(&self) -> usize {
        self.core.base_hand_size()
    }

    pub fn set_base_hand_size(&mut self, size: usize) {
        self.core.set_base_hand_size(size);
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.core.is_player_turn()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.core.phase()
    }

    // === Turn flow ===

    /// Begin the next turn: advance the counter, refill energy, draw.
    ///
    /// Returns the number of cards drawn. Calling this during a player
    /// turn is allowed; the current hand is kept.
    pub fn start_turn(&mut self) -> usize {
        if self.core.is_player_turn() {
            warn!(turn = self.core.current_turn(), "start_turn during player turn; hand carried over");
        }

        let turn = self.core.begin_turn();
        self.reset_energy();
        let to_draw = self.rules.cards_to_draw(&self.core);
        let drawn = self.core.draw_cards(to_draw);
        debug!(turn, energy = self.core.current_energy(), drawn, "turn started");

        self.core.notify_turn_started(turn);
        drawn
    }

    /// End the player's turn.
    ///
    /// Each card left in hand goes through the normal discard path
    /// (`RETAIN` cards stay, `ETHEREAL` cards are exhausted), then
    /// this-turn cost modifiers are cleared. Returns `false` and does
    /// nothing outside a player turn.
    pub fn end_turn(&mut self) -> bool {
        if self.core.phase() != TurnPhase::PlayerTurn {
            warn!(phase = ?self.core.phase(), "end_turn outside player turn ignored");
            return false;
        }

        self.core.finish_turn();
        let turn = self.core.current_turn();

        let hand: Vec<(EntityId, CardKeywords)> = match self.core.deck_instance() {
            Some(deck) => deck
                .hand()
                .iter()
                .map(|card| {
                    let keywords = deck
                        .registry()
                        .get(card.card_id)
                        .map_or(CardKeywords::empty(), |def| def.keywords);
                    (card.entity_id, keywords)
                })
                .collect(),
            None => Vec::new(),
        };

        for (card, keywords) in hand {
            if keywords.contains(CardKeywords::RETAIN) {
                continue;
            }
            if keywords.contains(CardKeywords::ETHEREAL) {
                self.core.exhaust_card(card);
            } else {
                self.core.discard_card(card);
            }
        }

        if let Some(deck) = self.core.deck_instance_mut() {
            deck.clear_turn_modifiers();
        }
        debug!(turn, "turn ended");

        self.core.notify_turn_ended(turn);
        true
    }

    // === Playing cards ===

    /// Play a card from hand at an optional target.
    ///
    /// `Err` is a rejection: nothing changed (for `EffectFailed`, the
    /// spent energy was refunded).
    pub fn play_card(&mut self, card: EntityId, target: Option<EntityId>) -> Result<(), PlayError> {
        let deck = self.core.deck_instance().ok_or(PlayError::NoDeck)?;
        if !self.core.is_player_turn() {
            return Err(PlayError::NotPlayerTurn);
        }
        let instance = deck.hand().get(card).ok_or(PlayError::CardNotInHand(card))?;

        self.rules.check_play(&self.core, instance, target)?;
        let cost = self.rules.evaluate_card_cost(&self.core, instance);
        let exhausts = deck
            .registry()
            .get(instance.card_id)
            .is_some_and(|def| def.is_exhaust());
        let mut detached = instance.clone();

        let energy_before = self.core.current_energy();
        if !self.core.spend_energy(cost) {
            return Err(PlayError::InsufficientEnergy {
                cost,
                available: energy_before,
            });
        }

        if !self.rules.apply_card_effect(&mut self.core, card, target) {
            self.core.set_energy(energy_before);
            debug!(%card, cost, "card effect failed; energy refunded");
            return Err(PlayError::EffectFailed(card));
        }

        let Some(deck) = self.core.deck_instance_mut() else {
            return Ok(());
        };
        let removed = match deck.card_mut(card) {
            Some(instance) => {
                instance.record_play();
                false
            }
            None => {
                warn!(%card, "card removed from deck by its own effect");
                detached.record_play();
                true
            }
        };
        let still_in_hand = deck.hand().contains(card);

        let detached = removed.then_some(&detached);
        self.core.notify_card_played(card, target, detached);
        debug!(%card, cost, ?target, energy = self.core.current_energy(), "card played");

        if !still_in_hand {
            if !removed {
                warn!(%card, "card left hand during its effect; skipping zone transition");
            }
            return Ok(());
        }
        if exhausts {
            self.core.exhaust_card(card);
        } else {
            self.core.discard_card(card);
        }
        Ok(())
    }

    /// Play the card at a hand index.
    pub fn play_card_at(&mut self, index: usize, target: Option<EntityId>) -> Result<(), PlayError> {
        let hand = self.core.deck_instance().ok_or(PlayError::NoDeck)?.hand();
        let card = hand
            .get_at(index)
            .map(|c| c.entity_id)
            .ok_or(PlayError::IndexOutOfRange {
                index,
                len: hand.len(),
            })?;
        self.play_card(card, target)
    }

    /// Ask the rules whether a card in hand could be played right now.
    #[must_use]
    pub fn can_play_card(&self, card: EntityId, target: Option<EntityId>) -> bool {
        self.core
            .deck_instance()
            .and_then(|deck| deck.hand().get(card))
            .is_some_and(|instance| self.rules.can_play_card(&self.core, instance, target))
    }

    /// Draw up to `count` cards. Returns how many were drawn.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        self.core.draw_cards(count)
    }

    // === Energy ===

    pub fn spend_energy(&mut self, amount: u32) -> bool {
        self.core.spend_energy(amount)
    }

    pub fn gain_energy(&mut self, amount: u32) {
        self.core.gain_energy(amount);
    }

    /// Set energy to the rules' starting energy.
    pub fn reset_energy(&mut self) {
        let energy = self.rules.starting_energy(&self.core);
        self.core.set_energy(energy);
    }

    // === Encounters ===

    /// Start a fresh encounter: all cards back into the draw pile, turn
    /// counter to 0, energy to 0.
    pub fn reset_combat(&mut self) {
        if let Some(deck) = self.core.deck_instance_mut() {
            deck.reset();
        }
        self.core.rewind();
        self.core.set_energy(0);
        debug!("combat reset");
    }

    // === Signals ===

    /// Subscribe to `TemplateEvent`s.
    pub fn connect<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TemplateEvent) + 'static,
    {
        self.core.connect(callback)
    }

    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        self.core.disconnect(id)
    }
}

impl<R: DeckRules> DeckMixin for DeckbuilderTemplate<R> {
    fn deck_instance(&self) -> Option<&DeckInstance> {
        self.core.deck_instance()
    }

    fn deck_instance_mut(&mut self) -> Option<&mut DeckInstance> {
        self.core.deck_instance_mut()
    }

    fn hand_size(&self) -> usize {
        self.core.base_hand_size()
    }
}

impl<R: DeckRules + std::fmt::Debug> std::fmt::Debug for DeckbuilderTemplate<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckbuilderTemplate")
            .field("core", &self.core)
            .field("rules", &self.rules)
            .finish()
    }
}
