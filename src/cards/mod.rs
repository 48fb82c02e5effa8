//! Card system: definitions, instances, keywords and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Arena handle for a card definition
//! - `CardDefinition`: Immutable card data shared by all copies
//! - `CardKeywords`: Rule flags the engine interprets (exhaust, retain, ...)
//! - `CardInstance`: One mutable copy of a card in a deck
//! - `CardRegistry`: Definition lookup by id or key

pub mod definition;
pub mod instance;
pub mod keywords;
pub mod registry;

pub use definition::{CardDefinition, CardId};
pub use instance::{CardInstance, CostModifier, ModifierDuration};
pub use keywords::{CardKeywords, CardType, TargetKind};
pub use registry::CardRegistry;
