//! Rules policy for game implementations.
//!
//! Games implement `DeckRules` to define:
//! - The starting deck
//! - Card costs and playability
//! - Per-turn energy and draw
//! - Card effects
//!
//! The template calls into `DeckRules` but never interprets card effects
//! itself.

pub mod policy;

pub use policy::{check_basic_play, DeckRules, DefaultRules};
