//! Deck instance: the four zones plus the permanent card roster.
//!
//! ## Conservation
//!
//! `draw + hand + discard + exhaust == roster` holds between any two public
//! calls. Cards move by value, so no operation can duplicate or lose one;
//! only `add_card*` and `remove_card` change the roster size.
//!
//! ## Reshuffle on empty
//!
//! `draw_one` on an empty draw pile moves the whole discard pile into the
//! draw pile and shuffles it before drawing. This is the only implicit pile
//! mutation the deck performs.

use std::sync::Arc;

use tracing::debug;

use crate::cards::{CardDefinition, CardId, CardInstance, CardKeywords, CardRegistry, ModifierDuration};
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::DeckError;
use crate::core::rng::GameRng;
use crate::zones::{CardPile, Hand, Zone, ZonePosition};

use super::definition::DeckDefinition;

/// Result of a successful `draw_one`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    /// The card now in hand.
    pub card: EntityId,
    /// Whether the discard pile was shuffled into the draw pile first.
    pub reshuffled: bool,
}

/// A deck in play.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use rust_deckbuilder::cards::{CardDefinition, CardId, CardRegistry};
/// use rust_deckbuilder::core::GameRng;
/// use rust_deckbuilder::deck::{DeckDefinition, DeckInstance};
/// use rust_deckbuilder::zones::Zone;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "strike", "Strike")).unwrap();
///
/// let def = DeckDefinition::new("starter").with_card(CardId::new(1), 3);
/// let mut deck = DeckInstance::from_definition(&def, Arc::new(registry), GameRng::new(1)).unwrap();
///
/// let drawn = deck.draw_one().unwrap();
/// assert_eq!(deck.zone_of(drawn.card), Some(Zone::Hand));
/// assert_eq!(deck.count(Zone::Draw), 2);
/// ```
#[derive(Clone, Debug)]
pub struct DeckInstance {
    name: String,
    registry: Arc<CardRegistry>,
    draw: CardPile,
    hand: Hand,
    discard: CardPile,
    exhaust: CardPile,
    /// Every card id in the deck, in creation order.
    roster: Vec<EntityId>,
    ids: EntityAllocator,
    rng: GameRng,
}

impl DeckInstance {
    /// Build a deck with card ids starting at 0.
    pub fn from_definition(
        def: &DeckDefinition,
        registry: Arc<CardRegistry>,
        rng: GameRng,
    ) -> Result<Self, DeckError> {
        Self::from_definition_with_ids(def, registry, rng, EntityAllocator::new())
    }

    /// Build a deck, allocating card ids from `ids`.
    ///
    /// All cards start in the draw pile, shuffled, with `INNATE` cards on
    /// top.
    pub fn from_definition_with_ids(
        def: &DeckDefinition,
        registry: Arc<CardRegistry>,
        rng: GameRng,
        ids: EntityAllocator,
    ) -> Result<Self, DeckError> {
        def.validate(&registry)?;

        let mut deck = Self {
            name: def.name.clone(),
            registry,
            draw: CardPile::new(),
            hand: Hand::new(),
            discard: CardPile::new(),
            exhaust: CardPile::new(),
            roster: Vec::with_capacity(def.total_cards()),
            ids,
            rng,
        };

        for entry in &def.entries {
            for _ in 0..entry.count {
                let card = deck.create_instance(entry.card)?;
                deck.draw.push_top(card);
            }
        }
        deck.shuffle_with_innate();

        debug!(deck = %deck.name, cards = deck.roster.len(), "deck built");
        Ok(deck)
    }

    fn create_instance(&mut self, card_id: CardId) -> Result<CardInstance, DeckError> {
        let entity_id = self.ids.alloc()?;
        self.roster.push(entity_id);
        Ok(CardInstance::new(entity_id, card_id))
    }

    fn shuffle_with_innate(&mut self) {
        self.draw.shuffle(&mut self.rng);
        let registry = &self.registry;
        self.draw.lift_to_top(|card| {
            registry
                .get(card.card_id)
                .is_some_and(|def| def.has_keyword(CardKeywords::INNATE))
        });
    }

    // === Accessors ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn draw_pile(&self) -> &CardPile {
        &self.draw
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &CardPile {
        &self.discard
    }

    #[must_use]
    pub fn exhaust_pile(&self) -> &CardPile {
        &self.exhaust
    }

    /// Master list of card ids, in creation order.
    #[must_use]
    pub fn roster(&self) -> &[EntityId] {
        &self.roster
    }

    /// Set the advisory hand limit.
    pub fn set_hand_limit(&mut self, max_size: usize) {
        self.hand.set_max_size(max_size);
    }

    /// Permanent card count (the roster size).
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.roster.len()
    }

    /// Sum of the four zone counts.
    #[must_use]
    pub fn zone_total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    #[must_use]
    pub fn count(&self, zone: Zone) -> usize {
        match zone {
            Zone::Draw => self.draw.len(),
            Zone::Hand => self.hand.len(),
            Zone::Discard => self.discard.len(),
            Zone::Exhaust => self.exhaust.len(),
        }
    }

    /// Which zone holds a card.
    #[must_use]
    pub fn zone_of(&self, id: EntityId) -> Option<Zone> {
        if self.hand.contains(id) {
            Some(Zone::Hand)
        } else if self.draw.contains(id) {
            Some(Zone::Draw)
        } else if self.discard.contains(id) {
            Some(Zone::Discard)
        } else if self.exhaust.contains(id) {
            Some(Zone::Exhaust)
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.zone_of(id).is_some()
    }

    /// Look up a card in whichever zone holds it.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&CardInstance> {
        self.hand
            .get(id)
            .or_else(|| self.draw.get(id))
            .or_else(|| self.discard.get(id))
            .or_else(|| self.exhaust.get(id))
    }

    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut CardInstance> {
        match self.zone_of(id)? {
            Zone::Hand => self.hand.get_mut(id),
            Zone::Draw => self.draw.get_mut(id),
            Zone::Discard => self.discard.get_mut(id),
            Zone::Exhaust => self.exhaust.get_mut(id),
        }
    }

    /// Definition of a card in this deck.
    #[must_use]
    pub fn definition_of(&self, id: EntityId) -> Option<&CardDefinition> {
        let card = self.card(id)?;
        self.registry.get(card.card_id)
    }

    // === Drawing ===

    /// Draw the top card into the hand.
    ///
    /// Reshuffles the discard pile into the draw pile if the draw pile is
    /// empty. `None` means there was nothing left to draw anywhere.
    pub fn draw_one(&mut self) -> Option<Draw> {
        let mut reshuffled = false;
        if self.draw.is_empty() {
            if !self.reshuffle_discard_into_draw() {
                return None;
            }
            reshuffled = true;
        }

        let card = self.draw.pop_top()?;
        let id = card.entity_id;
        self.hand.add(card);
        Some(Draw {
            card: id,
            reshuffled,
        })
    }

    /// Move the discard pile into the draw pile and shuffle.
    ///
    /// Returns `false` if the discard pile was empty.
    pub fn reshuffle_discard_into_draw(&mut self) -> bool {
        if self.discard.is_empty() {
            return false;
        }
        let moved = self.discard.len();
        self.draw.append(&mut self.discard);
        self.draw.shuffle(&mut self.rng);
        debug!(deck = %self.name, moved, "discard pile shuffled into draw pile");
        true
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle_draw_pile(&mut self) {
        self.draw.shuffle(&mut self.rng);
    }

    // === Zone moves ===

    /// Move a card from hand to the top of the discard pile.
    pub fn discard_from_hand(&mut self, id: EntityId) -> bool {
        self.hand.discard_to(id, &mut self.discard)
    }

    /// Move a card from hand to the exhaust pile.
    pub fn exhaust_from_hand(&mut self, id: EntityId) -> bool {
        self.hand.discard_to(id, &mut self.exhaust)
    }

    /// Move a card to another zone.
    ///
    /// `position` applies to piles; the hand always appends. Moving a card
    /// to the zone it is already in repositions it within that pile.
    /// Returns the zone the card came from.
    pub fn move_card(
        &mut self,
        id: EntityId,
        to: Zone,
        position: ZonePosition,
    ) -> Result<Zone, DeckError> {
        let from = self.zone_of(id).ok_or(DeckError::CardNotFound(id))?;
        if from == Zone::Hand && to == Zone::Hand {
            return Ok(from);
        }
        let card = self.take_from(from, id).ok_or(DeckError::CardNotFound(id))?;
        self.put_into(to, card, position);
        Ok(from)
    }

    fn take_from(&mut self, zone: Zone, id: EntityId) -> Option<CardInstance> {
        match zone {
            Zone::Draw => self.draw.remove(id),
            Zone::Hand => self.hand.remove(id),
            Zone::Discard => self.discard.remove(id),
            Zone::Exhaust => self.exhaust.remove(id),
        }
    }

    fn put_into(&mut self, zone: Zone, card: CardInstance, position: ZonePosition) {
        let rng = Some(&mut self.rng);
        match zone {
            Zone::Draw => self.draw.insert(card, position, rng),
            Zone::Hand => self.hand.add(card),
            Zone::Discard => self.discard.insert(card, position, rng),
            Zone::Exhaust => self.exhaust.insert(card, position, rng),
        }
    }

    // === Roster changes ===

    /// Permanently add a copy of a card to the discard pile.
    pub fn add_card(&mut self, card_id: CardId) -> Result<EntityId, DeckError> {
        self.add_card_to(card_id, Zone::Discard)
    }

    /// Permanently add a copy of a card to a zone.
    ///
    /// The draw pile receives it at a random position.
    pub fn add_card_to(&mut self, card_id: CardId, zone: Zone) -> Result<EntityId, DeckError> {
        self.registry.require(card_id)?;
        let card = self.create_instance(card_id)?;
        let id = card.entity_id;
        let position = if zone == Zone::Draw {
            ZonePosition::Random
        } else {
            ZonePosition::Top
        };
        self.put_into(zone, card, position);
        debug!(deck = %self.name, card = %id, %card_id, %zone, "card added to deck");
        Ok(id)
    }

    /// Permanently remove a card from whichever zone holds it.
    ///
    /// `None` means the card is not in this deck.
    pub fn remove_card(&mut self, id: EntityId) -> Option<CardInstance> {
        let zone = self.zone_of(id)?;
        let card = self.take_from(zone, id)?;
        self.roster.retain(|&e| e != id);
        debug!(deck = %self.name, card = %id, %zone, "card removed from deck");
        Some(card)
    }

    // === Bulk operations ===

    /// Gather every card back into the draw pile and reshuffle.
    ///
    /// Used between encounters. `INNATE` cards go back on top.
    pub fn reset(&mut self) {
        let mut gathered = self.hand.take_all();
        gathered.extend(self.discard.take_all());
        gathered.extend(self.exhaust.take_all());
        for card in gathered {
            self.draw.push_top(card);
        }
        self.shuffle_with_innate();
        debug!(deck = %self.name, cards = self.draw.len(), "deck reset");
    }

    /// Drop `ThisTurn` cost modifiers from every card.
    pub fn clear_turn_modifiers(&mut self) {
        let piles = self
            .draw
            .iter_mut()
            .chain(self.discard.iter_mut())
            .chain(self.exhaust.iter_mut());
        for card in piles.chain(self.hand.iter_mut()) {
            card.clear_modifiers(ModifierDuration::ThisTurn);
        }
    }

    /// Verify every roster card is in exactly one zone.
    pub fn check_conservation(&self) -> Result<(), DeckError> {
        let zones = self.zone_total();
        let roster = self.roster.len();
        if zones != roster {
            return Err(DeckError::ConservationViolated { zones, roster });
        }
        if let Some(&missing) = self.roster.iter().find(|&&id| !self.contains(id)) {
            return Err(DeckError::CardNotFound(missing));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRIKE: CardId = CardId::new(1);
    const DEFEND: CardId = CardId::new(2);
    const OPENER: CardId = CardId::new(3);

    fn registry() -> Arc<CardRegistry> {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::new(STRIKE, "strike", "Strike").with_cost(1))
            .unwrap();
        registry
            .register(CardDefinition::new(DEFEND, "defend", "Defend").with_cost(1))
            .unwrap();
        registry
            .register(
                CardDefinition::new(OPENER, "opener", "Opener")
                    .with_keywords(CardKeywords::INNATE),
            )
            .unwrap();
        Arc::new(registry)
    }

    fn deck(strikes: u32, defends: u32) -> DeckInstance {
        let def = DeckDefinition::new("test")
            .with_card(STRIKE, strikes)
            .with_card(DEFEND, defends);
        DeckInstance::from_definition(&def, registry(), GameRng::new(42)).unwrap()
    }

    #[test]
    fn test_build_puts_everything_in_draw() {
        let deck = deck(5, 5);
        assert_eq!(deck.total_cards(), 10);
        assert_eq!(deck.count(Zone::Draw), 10);
        assert_eq!(deck.count(Zone::Hand), 0);
        assert!(deck.check_conservation().is_ok());
    }

    #[test]
    fn test_build_rejects_unknown_card() {
        let def = DeckDefinition::new("bad").with_card(CardId::new(99), 1);
        let err = DeckInstance::from_definition(&def, registry(), GameRng::new(1)).unwrap_err();
        assert_eq!(err, DeckError::UnknownCard(CardId::new(99)));
    }

    #[test]
    fn test_ids_from_allocator() {
        let def = DeckDefinition::new("d").with_card(STRIKE, 2);
        let deck = DeckInstance::from_definition_with_ids(
            &def,
            registry(),
            GameRng::new(1),
            EntityAllocator::starting_at(100),
        )
        .unwrap();
        assert_eq!(deck.roster(), &[EntityId(100), EntityId(101)]);
    }

    #[test]
    fn test_innate_cards_on_top() {
        let def = DeckDefinition::new("d")
            .with_card(STRIKE, 8)
            .with_card(OPENER, 2);
        let deck = DeckInstance::from_definition(&def, registry(), GameRng::new(7)).unwrap();

        let top_two: Vec<_> = deck.draw_pile().peek_n(2).map(|c| c.card_id).collect();
        assert_eq!(top_two, vec![OPENER, OPENER]);
    }

    #[test]
    fn test_draw_one_moves_to_hand() {
        let mut deck = deck(3, 0);
        let top = deck.draw_pile().peek_top().unwrap().entity_id;

        let draw = deck.draw_one().unwrap();
        assert_eq!(draw.card, top);
        assert!(!draw.reshuffled);
        assert_eq!(deck.zone_of(top), Some(Zone::Hand));
        assert_eq!(deck.count(Zone::Draw), 2);
    }

    #[test]
    fn test_draw_reshuffles_discard_when_empty() {
        let mut deck = deck(5, 0);
        for _ in 0..5 {
            let draw = deck.draw_one().unwrap();
            assert!(deck.discard_from_hand(draw.card));
        }
        assert_eq!(deck.count(Zone::Draw), 0);
        assert_eq!(deck.count(Zone::Discard), 5);

        let draw = deck.draw_one().unwrap();
        assert!(draw.reshuffled);
        assert_eq!(deck.count(Zone::Hand), 1);
        assert_eq!(deck.count(Zone::Draw), 4);
        assert_eq!(deck.count(Zone::Discard), 0);
        assert!(deck.check_conservation().is_ok());
    }

    #[test]
    fn test_draw_empty_everywhere() {
        let mut deck = deck(1, 0);
        let draw = deck.draw_one().unwrap();
        assert!(deck.exhaust_from_hand(draw.card));

        assert!(deck.draw_one().is_none());
        assert_eq!(deck.count(Zone::Exhaust), 1);
    }

    #[test]
    fn test_discard_not_in_hand() {
        let mut deck = deck(2, 0);
        let in_draw = deck.draw_pile().peek_top().unwrap().entity_id;
        assert!(!deck.discard_from_hand(in_draw));
        assert_eq!(deck.count(Zone::Draw), 2);
    }

    #[test]
    fn test_move_card() {
        let mut deck = deck(3, 0);
        let id = deck.roster()[0];

        let from = deck.move_card(id, Zone::Exhaust, ZonePosition::Top).unwrap();
        assert_eq!(from, Zone::Draw);
        assert_eq!(deck.zone_of(id), Some(Zone::Exhaust));

        deck.move_card(id, Zone::Hand, ZonePosition::Top).unwrap();
        assert_eq!(deck.zone_of(id), Some(Zone::Hand));

        let err = deck.move_card(EntityId(500), Zone::Hand, ZonePosition::Top).unwrap_err();
        assert_eq!(err, DeckError::CardNotFound(EntityId(500)));
        assert!(deck.check_conservation().is_ok());
    }

    #[test]
    fn test_add_and_remove_cards() {
        let mut deck = deck(2, 0);

        let added = deck.add_card(DEFEND).unwrap();
        assert_eq!(deck.zone_of(added), Some(Zone::Discard));
        assert_eq!(deck.total_cards(), 3);

        let shuffled_in = deck.add_card_to(DEFEND, Zone::Draw).unwrap();
        assert_eq!(deck.zone_of(shuffled_in), Some(Zone::Draw));

        let removed = deck.remove_card(added).unwrap();
        assert_eq!(removed.card_id, DEFEND);
        assert_eq!(deck.total_cards(), 3);
        assert!(deck.remove_card(added).is_none());
        assert!(deck.check_conservation().is_ok());

        assert_eq!(
            deck.add_card(CardId::new(77)).unwrap_err(),
            DeckError::UnknownCard(CardId::new(77))
        );
    }

    #[test]
    fn test_reset_gathers_all_zones() {
        let mut deck = deck(4, 4);
        let a = deck.draw_one().unwrap().card;
        let b = deck.draw_one().unwrap().card;
        deck.draw_one().unwrap();
        deck.discard_from_hand(a);
        deck.exhaust_from_hand(b);

        deck.reset();
        assert_eq!(deck.count(Zone::Draw), 8);
        assert_eq!(deck.zone_total(), 8);
        assert!(deck.check_conservation().is_ok());
    }

    #[test]
    fn test_clear_turn_modifiers_everywhere() {
        let mut deck = deck(2, 0);
        let drawn = deck.draw_one().unwrap().card;
        let other = deck.draw_pile().peek_top().unwrap().entity_id;

        for id in [drawn, other] {
            deck.card_mut(id)
                .unwrap()
                .add_cost_modifier(-1, ModifierDuration::ThisTurn);
        }
        deck.clear_turn_modifiers();

        assert!(deck.card(drawn).unwrap().cost_modifiers.is_empty());
        assert!(deck.card(other).unwrap().cost_modifiers.is_empty());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = deck(5, 5);
        let b = deck(5, 5);
        let order = |d: &DeckInstance| -> Vec<CardId> { d.draw_pile().iter().map(|c| c.card_id).collect() };
        assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn test_build_fails_when_ids_run_out() {
        let def = DeckDefinition::new("big").with_card(STRIKE, 3);
        let ids = EntityAllocator::starting_at(u32::MAX - 2);

        let err = DeckInstance::from_definition_with_ids(&def, registry(), GameRng::new(1), ids).unwrap_err();
        assert_eq!(err, DeckError::IdsExhausted);
    }

    #[test]
    fn test_add_card_fails_when_ids_run_out() {
        let def = DeckDefinition::new("edge").with_card(STRIKE, 1);
        let ids = EntityAllocator::starting_at(u32::MAX - 1);
        let mut deck = DeckInstance::from_definition_with_ids(&def, registry(), GameRng::new(1), ids).unwrap();

        assert_eq!(deck.add_card(DEFEND), Err(DeckError::IdsExhausted));
        assert_eq!(deck.total_cards(), 1);
        assert!(deck.check_conservation().is_ok());
    }
}
