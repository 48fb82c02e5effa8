//! Zones: where a card instance can be.
//!
//! Every card in a deck is in exactly one of four zones. Piles are ordered
//! stacks; the hand is an indexable list.
//!
//! ## Key Types
//!
//! - `Zone`: Which of the four zones
//! - `CardPile`: Draw, discard and exhaust piles
//! - `Hand`: Cards available to play
//! - `ZonePosition`: Insert position within a pile

pub mod hand;
pub mod pile;

use serde::{Deserialize, Serialize};

pub use hand::Hand;
pub use pile::{CardPile, ZonePosition};

/// One of the four mutually exclusive card locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

impl Zone {
    /// All zones, in draw → hand → discard → exhaust order.
    pub const ALL: [Zone; 4] = [Zone::Draw, Zone::Hand, Zone::Discard, Zone::Exhaust];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Draw => "draw pile",
            Zone::Hand => "hand",
            Zone::Discard => "discard pile",
            Zone::Exhaust => "exhaust pile",
        };
        f.write_str(name)
    }
}
