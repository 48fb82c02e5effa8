//! Decks: definitions, live instances and the capability contracts.
//!
//! ## Key Types
//!
//! - `DeckDefinition`: Which cards (and how many) a deck starts with
//! - `DeckInstance`: The four zones plus the permanent roster
//! - `DeckMixin`: Accessor contract for anything that owns a deck
//! - `DeckHooks`: Lifecycle callbacks (drawn, played, discarded, ...)

pub mod definition;
pub mod instance;
pub mod mixin;

pub use definition::{DeckDefinition, DeckEntry};
pub use instance::{DeckInstance, Draw};
pub use mixin::{DeckHooks, DeckMixin, HookCall, NoHooks, RecordingHooks};
