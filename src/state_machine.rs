//! Session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The runtime applies the returned effects and feeds provider results back
//! in as events.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use effect::{Effect, MoodSource};
pub use event::Event;
pub use state::{normalize_name, ConvContext, Session, SessionState, Turn};
pub use transition::{transition, TransitionError, TransitionResult};
