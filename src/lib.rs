//! # rust-deckbuilder
//!
//! A reusable turn engine for single-player deckbuilding card games.
//!
//! ## Design Principles
//!
//! 1. **Rules Live in the Game**: The template owns turns, energy and card
//!    movement. What a card does, what it costs and whether it can be
//!    played are answered by the game's `DeckRules`.
//!
//! 2. **One Zone per Card**: Card instances move by value between the draw
//!    pile, hand, discard pile and exhaust pile. A card cannot be in two
//!    zones or in none.
//!
//! 3. **Deterministic**: Shuffles come from a seeded ChaCha8 RNG, so a seed
//!    replays a run exactly.
//!
//! ## Architecture
//!
//! - **Template / Core split**: `DeckbuilderTemplate` owns a
//!   `DeckbuilderCore` and a `DeckRules` side by side. Rules receive the
//!   core mutably, so effects draw cards and gain energy through the same
//!   hooked paths as the template.
//!
//! - **Hooks and Signals**: `DeckHooks` is the single lifecycle sink a
//!   game installs. `Signals` carries `TemplateEvent`s to any number of
//!   presentation-layer subscribers.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, errors
//! - `cards`: Card definitions, keywords, instances, the registry
//! - `zones`: Piles and the hand
//! - `deck`: Deck definitions, deck instances, hooks
//! - `rules`: `DeckRules` trait for game implementations
//! - `template`: The turn engine
//! - `games`: Concrete games

pub mod core;
pub mod cards;
pub mod zones;
pub mod deck;
pub mod rules;
pub mod template;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    DeckError, DeckbuilderConfig, EntityAllocator, EntityId, GameRng, GameRngState, PlayError,
};

pub use crate::cards::{
    CardDefinition, CardId, CardInstance, CardKeywords, CardRegistry, CardType, CostModifier,
    ModifierDuration, TargetKind,
};

pub use crate::zones::{CardPile, Hand, Zone, ZonePosition};

pub use crate::deck::{
    DeckDefinition, DeckEntry, DeckHooks, DeckInstance, DeckMixin, Draw, HookCall, NoHooks,
    RecordingHooks,
};

pub use crate::rules::{check_basic_play, DeckRules, DefaultRules};

pub use crate::template::{
    DeckbuilderCore, DeckbuilderTemplate, Signals, SubscriptionId, TemplateEvent, TurnPhase,
};
