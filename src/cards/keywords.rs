//! Card keywords, types and targeting.
//!
//! Keywords are rule-bearing flags the engine itself interprets. Everything
//! else about what a card does is left to the game's `DeckRules`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Keyword set carried by a card definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CardKeywords: u32 {
        /// Cannot be played.
        const UNPLAYABLE = 1 << 0;
        /// Goes to the exhaust pile instead of the discard pile when played.
        const EXHAUST = 1 << 1;
        /// Starts on top of the draw pile when a deck is built or reset.
        const INNATE = 1 << 2;
        /// Kept in hand at end of turn.
        const RETAIN = 1 << 3;
        /// Exhausted at end of turn if still in hand.
        const ETHEREAL = 1 << 4;
    }
}

/// Broad card category. Informational for the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

/// What a card expects as its play target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// No target needed.
    #[default]
    None,
    /// A single enemy must be chosen.
    SingleEnemy,
    /// Hits every enemy; no explicit target.
    AllEnemies,
    /// Targets the player playing it.
    Caster,
}

impl TargetKind {
    /// Does playing this card require an explicit target?
    #[must_use]
    pub const fn requires_target(self) -> bool {
        matches!(self, TargetKind::SingleEnemy)
    }
}
