//! Skirmish game tests.
//!
//! Full encounters through the public API, with a UI-style subscriber
//! watching the template's signals.

use std::cell::RefCell;
use std::rc::Rc;

use rust_deckbuilder::core::PlayError;
use rust_deckbuilder::deck::DeckMixin;
use rust_deckbuilder::games::skirmish::{SkirmishBuilder, ENEMY, OFFERING, STRIKE, WOUND};
use rust_deckbuilder::template::TemplateEvent;
use rust_deckbuilder::zones::Zone;

/// Play every card that can be played at the enemy, cheapest first in hand order.
fn play_out_hand(game: &mut rust_deckbuilder::template::DeckbuilderTemplate<rust_deckbuilder::games::skirmish::SkirmishRules>) -> usize {
    let mut played = 0;
    loop {
        let Some(card) = game
            .deck_instance()
            .unwrap()
            .hand()
            .ids()
            .into_iter()
            .find(|&card| game.can_play_card(card, Some(ENEMY)))
        else {
            return played;
        };
        game.play_card(card, Some(ENEMY)).unwrap();
        played += 1;
    }
}

#[test]
fn test_encounter_until_victory() {
    let mut game = SkirmishBuilder::new().seed(1234).enemy_hp(24).build().unwrap();
    let mut turns = 0;

    while !game.rules().is_won() && turns < 30 {
        game.start_turn();
        play_out_hand(&mut game);
        game.end_turn();
        game.rules_mut().resolve_enemy_turn();
        turns += 1;
    }

    assert!(game.rules().is_won());
    assert!(game.rules().player.hp > 0);
    assert_eq!(game.deck_instance().unwrap().total_cards(), 10);
}

#[test]
fn test_signals_report_play() {
    let mut game = SkirmishBuilder::new().seed(5).build().unwrap();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.connect(move |e| sink.borrow_mut().push(e.clone()));

    game.start_turn();
    let strike_id = game.core().registry().id_for_key(STRIKE).unwrap();
    let strike = game
        .deck_instance_mut()
        .unwrap()
        .add_card_to(strike_id, Zone::Hand)
        .unwrap();
    game.play_card(strike, Some(ENEMY)).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            TemplateEvent::EnergyChanged { old: 0, new: 3 },
            TemplateEvent::TurnStarted { turn: 1 },
            TemplateEvent::EnergyChanged { old: 3, new: 2 },
            TemplateEvent::CardPlayed {
                card: strike,
                target: Some(ENEMY),
            },
        ]
    );
}

#[test]
fn test_acquired_cards_join_the_cycle() {
    let mut game = SkirmishBuilder::new().seed(9).build().unwrap();
    let offering = game.core().registry().id_for_key(OFFERING).unwrap();
    let wound = game.core().registry().id_for_key(WOUND).unwrap();

    let deck = game.deck_instance_mut().unwrap();
    let offering_card = deck.add_card(offering).unwrap();
    let wound_card = deck.add_card(wound).unwrap();
    assert_eq!(deck.zone_of(offering_card), Some(Zone::Discard));
    assert_eq!(deck.total_cards(), 12);

    // Cycle until both acquired cards have been drawn at least once.
    let mut seen_offering = false;
    let mut seen_wound = false;
    for _ in 0..10 {
        game.start_turn();
        let hand = game.deck_instance().unwrap().hand().ids();
        seen_offering |= hand.contains(&offering_card);
        seen_wound |= hand.contains(&wound_card);
        if hand.contains(&wound_card) {
            assert_eq!(game.play_card(wound_card, None), Err(PlayError::Unplayable(wound_card)));
        }
        game.end_turn();
    }

    assert!(seen_offering && seen_wound);
    assert!(game.deck_instance().unwrap().check_conservation().is_ok());
}
