//! Slide flow state machines for Deckhand template families.
//!
//! Every family is a transition table keyed by slide id. A table entry either
//! jumps to a fixed slide or hands the recipient's answer to a [`Decision`];
//! slides without an entry advance in document order and the last slide is
//! terminal. The [`FlowController`] is stateless: callers keep the current
//! slide and ask for the next one on every navigation event.

/// Built-in transition tables.
pub mod builtin;
/// The flow controller.
pub mod controller;
/// Answer-driven branch decisions.
pub mod decision;
/// Error types for flow control.
pub mod error;
/// Flow families and transition tables.
pub mod family;

pub use controller::FlowController;
pub use decision::Decision;
pub use error::{FlowError, FlowResult};
pub use family::{FlowFamily, Transition};
