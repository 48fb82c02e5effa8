//! Core engine types: entity ids, RNG, configuration, errors.
//!
//! These are game-agnostic. Games tune behavior through
//! `DeckbuilderConfig` and the `DeckRules` policy rather than by modifying
//! the core.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::DeckbuilderConfig;
pub use entity::{EntityAllocator, EntityId};
pub use error::{DeckError, PlayError};
pub use rng::{GameRng, GameRngState};
