//! Change notifications for presentation layers.
//!
//! UI and animation code subscribe to `TemplateEvent`s through `Signals`.
//! Unlike `DeckHooks`, which a game installs once, any number of
//! subscribers can come and go.

use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;

/// Something observable changed on the template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateEvent {
    EnergyChanged { old: u32, new: u32 },
    TurnStarted { turn: u32 },
    TurnEnded { turn: u32 },
    CardPlayed {
        card: EntityId,
        target: Option<EntityId>,
    },
}

/// Handle returned by `Signals::connect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

type Subscriber = Box<dyn FnMut(&TemplateEvent)>;

/// Subscriber list for `TemplateEvent`s.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use rust_deckbuilder::template::{Signals, TemplateEvent};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut signals = Signals::new();
/// signals.connect(move |e| sink.borrow_mut().push(e.clone()));
/// signals.emit(&TemplateEvent::TurnStarted { turn: 1 });
///
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct Signals {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Signals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It is invoked for every subsequent event.
    pub fn connect<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TemplateEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, in connection order.
    pub fn emit(&mut self, event: &TemplateEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signals")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
