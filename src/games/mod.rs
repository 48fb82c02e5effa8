//! Concrete games built on the deckbuilder template.

pub mod skirmish;
