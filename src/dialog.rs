//! Word memorization dialog
//!
//! A per-session state machine (count, then words, then confirmation) built
//! around a pure transition function. Sessions are owned by the caller and
//! passed in on every turn.

mod engine;
mod error;
pub mod intent;
pub mod speech;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use engine::DialogEngine;
pub use error::DialogError;
pub use intent::{Intent, SlotValue, Slots};
pub use speech::{Card, Segment, Speech, SpokenResponse};
pub use state::{GameContext, Session, Stage};
pub use transition::{transition, TransitionResult};
