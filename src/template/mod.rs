//! Deckbuilder template.
//!
//! - `state`: `DeckbuilderCore`, the energy/turn/deck state policies act on
//! - `engine`: `DeckbuilderTemplate`, the turn and play orchestration
//! - `events`: `Signals` for presentation-layer subscribers

pub mod engine;
pub mod events;
pub mod state;

pub use engine::DeckbuilderTemplate;
pub use events::{Signals, SubscriptionId, TemplateEvent};
pub use state::{DeckbuilderCore, TurnPhase};
