//! Observation order tests.
//!
//! Hooks, signals and the effect policy all write into one trace so the
//! relative order of every step of a play is visible.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use rust_deckbuilder::cards::{CardDefinition, CardId, CardInstance, CardKeywords, CardRegistry};
use rust_deckbuilder::core::{DeckbuilderConfig, EntityId, PlayError};
use rust_deckbuilder::deck::{DeckDefinition, DeckHooks, DeckMixin, HookCall, RecordingHooks};
use rust_deckbuilder::rules::DeckRules;
use rust_deckbuilder::template::{DeckbuilderCore, DeckbuilderTemplate, TemplateEvent};
use rust_deckbuilder::zones::Zone;

const BASIC: CardId = CardId::new(1);
const BURN: CardId = CardId::new(2);
const DUD: CardId = CardId::new(3);
const SELF_DISCARD: CardId = CardId::new(4);
const CANTRIP: CardId = CardId::new(5);
const VANISH: CardId = CardId::new(6);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Step {
    Energy { old: u32, new: u32 },
    Effect { play_count: u32 },
    Played { play_count: u32 },
    Discarded,
    Exhausted,
    Drawn,
    Shuffled,
    CardPlayedSignal,
    TurnStarted(u32),
    TurnEnded(u32),
}

type Trace = Rc<RefCell<Vec<Step>>>;

struct TraceHooks(Trace);

impl DeckHooks for TraceHooks {
    fn on_card_drawn(&mut self, _card: &CardInstance) {
        self.0.borrow_mut().push(Step::Drawn);
    }

    fn on_card_played(&mut self, card: &CardInstance, _target: Option<EntityId>) {
        self.0.borrow_mut().push(Step::Played {
            play_count: card.play_count,
        });
    }

    fn on_card_discarded(&mut self, _card: &CardInstance) {
        self.0.borrow_mut().push(Step::Discarded);
    }

    fn on_card_exhausted(&mut self, _card: &CardInstance) {
        self.0.borrow_mut().push(Step::Exhausted);
    }

    fn on_deck_shuffled(&mut self) {
        self.0.borrow_mut().push(Step::Shuffled);
    }

    fn on_turn_started(&mut self, turn: u32) {
        self.0.borrow_mut().push(Step::TurnStarted(turn));
    }

    fn on_turn_ended(&mut self, turn: u32) {
        self.0.borrow_mut().push(Step::TurnEnded(turn));
    }
}

/// Rules that trace effects. `DUD` fails, `SELF_DISCARD` discards itself,
/// `CANTRIP` draws a card, `VANISH` removes itself from the deck.
struct TraceRules {
    trace: Trace,
    deck: DeckDefinition,
}

impl DeckRules for TraceRules {
    fn create_deck_def(&mut self, _registry: &CardRegistry) -> Option<DeckDefinition> {
        Some(self.deck.clone())
    }

    fn apply_card_effect(
        &mut self,
        core: &mut DeckbuilderCore,
        card: EntityId,
        _target: Option<EntityId>,
    ) -> bool {
        let Some(instance) = core.deck_instance().and_then(|d| d.card(card)) else {
            return false;
        };
        let card_id = instance.card_id;
        self.trace.borrow_mut().push(Step::Effect {
            play_count: instance.play_count,
        });

        match card_id {
            DUD => false,
            SELF_DISCARD => core.discard_card(card),
            VANISH => core
                .deck_instance_mut()
                .and_then(|deck| deck.remove_card(card))
                .is_some(),
            CANTRIP => {
                core.draw_cards(1);
                true
            }
            _ => true,
        }
    }
}

fn registry() -> Arc<CardRegistry> {
    let mut registry = CardRegistry::new();
    registry
        .register(CardDefinition::new(BASIC, "basic", "Basic").with_cost(1))
        .unwrap();
    registry
        .register(
            CardDefinition::new(BURN, "burn", "Burn")
                .with_cost(2)
                .with_keywords(CardKeywords::EXHAUST),
        )
        .unwrap();
    registry
        .register(CardDefinition::new(DUD, "dud", "Dud").with_cost(2))
        .unwrap();
    registry
        .register(CardDefinition::new(SELF_DISCARD, "toss", "Toss").with_cost(1))
        .unwrap();
    registry
        .register(CardDefinition::new(CANTRIP, "cantrip", "Cantrip").with_cost(0))
        .unwrap();
    registry
        .register(CardDefinition::new(VANISH, "vanish", "Vanish").with_cost(1))
        .unwrap();
    Arc::new(registry)
}

/// Build a started game whose trace only covers what happens afterwards.
fn traced_game(deck: DeckDefinition) -> (DeckbuilderTemplate<TraceRules>, Trace) {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let rules = TraceRules {
        trace: Rc::clone(&trace),
        deck,
    };
    let mut game = DeckbuilderTemplate::with_hooks(
        DeckbuilderConfig::default(),
        registry(),
        rules,
        Box::new(TraceHooks(Rc::clone(&trace))),
    )
    .unwrap();

    let sink = Rc::clone(&trace);
    game.connect(move |event| match event {
        TemplateEvent::EnergyChanged { old, new } => sink.borrow_mut().push(Step::Energy { old: *old, new: *new }),
        TemplateEvent::CardPlayed { .. } => sink.borrow_mut().push(Step::CardPlayedSignal),
        _ => {}
    });

    game.start_turn();
    trace.borrow_mut().clear();
    (game, trace)
}

fn hand_of(game: &DeckbuilderTemplate<TraceRules>, card_id: CardId) -> EntityId {
    game.deck_instance()
        .unwrap()
        .hand()
        .iter()
        .find(|c| c.card_id == card_id)
        .map(|c| c.entity_id)
        .unwrap()
}

#[test]
fn test_play_order_discard() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(BASIC, 10));
    let card = hand_of(&game, BASIC);

    game.play_card(card, None).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Energy { old: 3, new: 2 },
            Step::Effect { play_count: 0 },
            Step::Played { play_count: 1 },
            Step::CardPlayedSignal,
            Step::Discarded,
        ]
    );
}

#[test]
fn test_play_order_exhaust() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(BURN, 10));
    let card = hand_of(&game, BURN);

    game.play_card(card, None).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Energy { old: 3, new: 1 },
            Step::Effect { play_count: 0 },
            Step::Played { play_count: 1 },
            Step::CardPlayedSignal,
            Step::Exhausted,
        ]
    );
}

#[test]
fn test_failed_effect_refunds() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(DUD, 10));
    let card = hand_of(&game, DUD);
    let hand_before = game.deck_instance().unwrap().hand().ids();

    assert_eq!(game.play_card(card, None), Err(PlayError::EffectFailed(card)));

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Energy { old: 3, new: 1 },
            Step::Effect { play_count: 0 },
            Step::Energy { old: 1, new: 3 },
        ]
    );
    let deck = game.deck_instance().unwrap();
    assert_eq!(game.current_energy(), 3);
    assert_eq!(deck.hand().ids(), hand_before);
    assert_eq!(deck.card(card).unwrap().play_count, 0);
    assert_eq!(deck.count(Zone::Discard), 0);
}

#[test]
fn test_rejection_fires_nothing() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(BURN, 10));
    let first = game.deck_instance().unwrap().hand().ids()[0];
    let second = game.deck_instance().unwrap().hand().ids()[1];
    game.play_card(first, None).unwrap();
    trace.borrow_mut().clear();

    assert!(matches!(
        game.play_card(second, None),
        Err(PlayError::InsufficientEnergy { .. })
    ));
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_effect_moving_its_card_skips_transition() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(SELF_DISCARD, 10));
    let card = hand_of(&game, SELF_DISCARD);

    game.play_card(card, None).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Energy { old: 3, new: 2 },
            Step::Effect { play_count: 0 },
            Step::Discarded,
            Step::Played { play_count: 1 },
            Step::CardPlayedSignal,
        ]
    );
    let deck = game.deck_instance().unwrap();
    assert_eq!(deck.zone_of(card), Some(Zone::Discard));
    assert_eq!(deck.count(Zone::Discard), 1);
    assert!(deck.check_conservation().is_ok());
}

#[test]
fn test_effect_removing_its_card_still_counts() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(VANISH, 10));
    let card = hand_of(&game, VANISH);

    game.play_card(card, Some(EntityId(7))).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Energy { old: 3, new: 2 },
            Step::Effect { play_count: 0 },
            Step::Played { play_count: 1 },
            Step::CardPlayedSignal,
        ]
    );
    let deck = game.deck_instance().unwrap();
    assert_eq!(game.current_energy(), 2);
    assert!(!deck.contains(card));
    assert_eq!(deck.total_cards(), 9);
    assert_eq!(deck.count(Zone::Discard) + deck.count(Zone::Exhaust), 0);
    assert!(deck.check_conservation().is_ok());
}

#[test]
fn test_effect_draws_through_hooks() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(CANTRIP, 10));
    let card = hand_of(&game, CANTRIP);

    game.play_card(card, None).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Step::Effect { play_count: 0 },
            Step::Drawn,
            Step::Played { play_count: 1 },
            Step::CardPlayedSignal,
            Step::Discarded,
        ]
    );
    assert_eq!(game.cards_in(Zone::Hand), 5);
    assert_eq!(game.current_energy(), 3);
}

#[test]
fn test_turn_hooks_and_reshuffle() {
    let (mut game, trace) = traced_game(DeckDefinition::new("d").with_card(BASIC, 6));
    game.play_card_at(0, None).unwrap();
    trace.borrow_mut().clear();

    game.end_turn();
    game.start_turn();

    let steps = trace.borrow().clone();
    assert_eq!(steps.first(), Some(&Step::Discarded));
    assert!(steps.contains(&Step::TurnEnded(1)));
    assert!(steps.contains(&Step::Shuffled));
    assert_eq!(steps.iter().filter(|s| **s == Step::Drawn).count(), 5);
    assert_eq!(steps.last(), Some(&Step::TurnStarted(2)));

    // Energy refill happens before the draw.
    let energy_at = steps.iter().position(|s| matches!(s, Step::Energy { .. })).unwrap();
    let first_draw = steps.iter().position(|s| *s == Step::Drawn).unwrap();
    assert!(energy_at < first_draw);
}

#[test]
fn test_recording_hooks_log() {
    let hooks = RecordingHooks::new();
    let rules = TraceRules {
        trace: Rc::new(RefCell::new(Vec::new())),
        deck: DeckDefinition::new("d").with_card(BASIC, 5),
    };
    let mut game = DeckbuilderTemplate::with_hooks(
        DeckbuilderConfig::default(),
        registry(),
        rules,
        Box::new(hooks.clone()),
    )
    .unwrap();

    game.start_turn();
    let card = game.deck_instance().unwrap().hand().ids()[0];
    hooks.clear();
    game.play_card(card, Some(EntityId(99))).unwrap();

    assert_eq!(
        hooks.calls(),
        vec![
            HookCall::Played {
                card,
                target: Some(EntityId(99)),
            },
            HookCall::Discarded(card),
        ]
    );
}
