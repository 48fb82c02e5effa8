//! Error types.
//!
//! Two families:
//! - [`DeckError`]: data and contract problems (unknown cards, bad JSON,
//!   broken zone accounting). Returned from fallible constructors.
//! - [`PlayError`]: why a card play was rejected. A rejection is an
//!   expected outcome the caller branches on, and leaves state untouched.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::entity::EntityId;

/// Data and contract errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("card {0} is not registered")]
    UnknownCard(CardId),

    #[error("card key '{0}' is not registered")]
    UnknownKey(String),

    #[error("card {0} is already registered")]
    DuplicateCard(CardId),

    #[error("card key '{0}' is already registered")]
    DuplicateKey(String),

    #[error("card instance {0} is not in this deck")]
    CardNotFound(EntityId),

    #[error("invalid deck definition: {0}")]
    InvalidDeck(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("entity ids exhausted")]
    IdsExhausted,

    #[error("zone totals ({zones}) do not match roster size ({roster})")]
    ConservationViolated { zones: usize, roster: usize },
}

/// Reasons a card play was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PlayError {
    #[error("no deck instance has been created")]
    NoDeck,

    #[error("cards can only be played during the player's turn")]
    NotPlayerTurn,

    #[error("card {0} is not in hand")]
    CardNotInHand(EntityId),

    #[error("hand index {index} out of range (hand has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("card {0} is unplayable")]
    Unplayable(EntityId),

    #[error("card costs {cost} energy but only {available} is available")]
    InsufficientEnergy { cost: u32, available: u32 },

    /// A game's own `check_play` refused the card for a reason the
    /// built-in checks do not cover.
    #[error("card {0} was rejected by the rules")]
    Rejected(EntityId),

    #[error("effect of card {0} failed; energy refunded")]
    EffectFailed(EntityId),
}
