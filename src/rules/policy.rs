//! Rules policy trait for concrete games.
//!
//! The template asks its `DeckRules` for every rule decision:
//! - Which deck to build and how
//! - What a card costs and whether it can be played
//! - How much energy and how many cards a turn starts with
//! - What a card actually does
//!
//! Every method has a default, so a game overrides only what it changes.

use std::sync::Arc;

use crate::cards::{CardInstance, CardRegistry};
use crate::core::entity::EntityId;
use crate::core::error::{DeckError, PlayError};
use crate::core::rng::GameRng;
use crate::deck::{DeckDefinition, DeckInstance};
use crate::template::DeckbuilderCore;

/// Policy hooks for the deckbuilder template.
///
/// ## Implementation Notes
///
/// - `create_deck_def`: Returning `None` leaves the template without a
///   deck; turns still advance but nothing can be drawn or played
/// - `check_play`: Must not mutate anything
/// - `apply_card_effect`: Returning `false` aborts the play; the template
///   refunds the energy and leaves the card in hand. An effect that fails
///   must not have changed anything else either
pub trait DeckRules {
    /// Supply the deck definition. Called once at startup.
    fn create_deck_def(&mut self, _registry: &CardRegistry) -> Option<DeckDefinition> {
        None
    }

    /// Build the deck instance from the definition.
    fn create_deck_instance(
        &mut self,
        def: &DeckDefinition,
        registry: Arc<CardRegistry>,
        rng: GameRng,
    ) -> Result<DeckInstance, DeckError> {
        DeckInstance::from_definition(def, registry, rng)
    }

    /// Energy a card costs right now.
    ///
    /// Default: the card's base cost adjusted by its modifiers.
    fn evaluate_card_cost(&self, core: &DeckbuilderCore, card: &CardInstance) -> u32 {
        core.registry()
            .get(card.card_id)
            .map_or(0, |def| card.effective_cost(def.base_cost))
    }

    /// Explain why a card cannot be played, or `Ok` if it can.
    ///
    /// Default: `check_basic_play`. Overrides that add their own reasons
    /// usually call it first and report extras as `PlayError::Rejected`.
    fn check_play(
        &self,
        core: &DeckbuilderCore,
        card: &CardInstance,
        _target: Option<EntityId>,
    ) -> Result<(), PlayError> {
        check_basic_play(self, core, card)
    }

    /// Boolean form of `check_play`.
    fn can_play_card(&self, core: &DeckbuilderCore, card: &CardInstance, target: Option<EntityId>) -> bool {
        self.check_play(core, card, target).is_ok()
    }

    /// Energy at the start of a turn. Default: `max_energy`.
    fn starting_energy(&self, core: &DeckbuilderCore) -> u32 {
        core.max_energy()
    }

    /// Cards drawn at the start of a turn. Default: `base_hand_size`.
    fn cards_to_draw(&self, core: &DeckbuilderCore) -> usize {
        core.base_hand_size()
    }

    /// Resolve a card's effect. The card is still in hand and its cost has
    /// already been paid.
    ///
    /// Default: does nothing and succeeds.
    fn apply_card_effect(
        &mut self,
        _core: &mut DeckbuilderCore,
        _card: EntityId,
        _target: Option<EntityId>,
    ) -> bool {
        true
    }
}

/// The built-in play checks: rejects outside the player's turn,
/// `UNPLAYABLE` cards and cards costing more than the current energy.
pub fn check_basic_play<R: DeckRules + ?Sized>(
    rules: &R,
    core: &DeckbuilderCore,
    card: &CardInstance,
) -> Result<(), PlayError> {
    if !core.is_player_turn() {
        return Err(PlayError::NotPlayerTurn);
    }

    let playable = core
        .registry()
        .get(card.card_id)
        .is_some_and(|def| def.is_playable());
    if !playable {
        return Err(PlayError::Unplayable(card.entity_id));
    }

    let cost = rules.evaluate_card_cost(core, card);
    let available = core.current_energy();
    if cost > available {
        return Err(PlayError::InsufficientEnergy { cost, available });
    }
    Ok(())
}

/// Rules with every default, optionally carrying a fixed deck.
#[derive(Clone, Debug, Default)]
pub struct DefaultRules {
    deck: Option<DeckDefinition>,
}

impl DefaultRules {
    /// Defaults with no deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, building the given deck at startup.
    #[must_use]
    pub fn with_deck(deck: DeckDefinition) -> Self {
        Self { deck: Some(deck) }
    }
}

impl DeckRules for DefaultRules {
    fn create_deck_def(&mut self, _registry: &CardRegistry) -> Option<DeckDefinition> {
        self.deck.clone()
    }
}
