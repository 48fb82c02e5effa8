//! Skirmish: one player against a single training enemy.
//!
//! A small concrete game exercising the deckbuilder template:
//! - Starter deck of 5 Strike, 4 Defend, 1 Bash
//! - Attacks need the enemy as their target; without one the play fails
//!   and its energy is refunded
//! - Block absorbs damage until the enemy's turn is resolved
//! - Vulnerable targets take 50% more attack damage

mod game;

pub use game::{
    starter_registry, Combatant, SkirmishBuilder, SkirmishRules, BASH, DAZED, DEFEND, ENEMY, GUARD,
    OFFERING, PLAYER, STARTER_DECK, STRIKE, WOUND,
};
