//! Entity identification for card instances and play targets.
//!
//! Every card instance in a deck has a unique `EntityId`, handed out by the
//! deck's `EntityAllocator`. Concrete games reuse the same id space for the
//! things cards are played at (enemies, the player, summons) so that a play
//! target is just another `EntityId`.
//!
//! ## Usage
//!
//! ```
//! use rust_deckbuilder::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::starting_at(100);
//! let first = alloc.alloc().unwrap();
//! let second = alloc.alloc().unwrap();
//!
//! assert_eq!(first, EntityId(100));
//! assert_eq!(second, EntityId(101));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::DeckError;

/// Unique identifier for a card instance or a play target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for entity ids.
///
/// Ids are never reused, even after the card holding one is removed from
/// its deck, so a stale id can never alias a newer card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    ///
    /// Games that number their own targets from 0 can start card ids above
    /// that range.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next id.
    ///
    /// `u32::MAX` is never handed out; once it is reached every further
    /// call fails with `DeckError::IdsExhausted`.
    pub fn alloc(&mut self) -> Result<EntityId, DeckError> {
        let id = EntityId(self.next);
        self.next = self.next.checked_add(1).ok_or(DeckError::IdsExhausted)?;
        Ok(id)
    }

    /// Peek at the id the next `alloc` will return.
    #[must_use]
    pub const fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}
