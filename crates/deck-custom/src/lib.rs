//! Customization engine for Deckhand.
//!
//! Turns a catalog template into a personalized copy for one recipient:
//! `{{key}}` placeholders are filled from the operator's payload and, for
//! advanced customizations, custom question slides are spliced into the deck.
//! Everything here is a pure function of its arguments.

/// Engine configuration.
pub mod config;
/// The customization engine.
pub mod engine;
/// Error types for customization.
pub mod error;
/// Operator-supplied customization payloads.
pub mod payload;
/// Placeholder scanning and substitution.
pub mod placeholder;
/// Customization records and completion checks.
pub mod record;

pub use config::CustomizeConfig;
pub use engine::CustomizationEngine;
pub use error::{CustomizeError, CustomizeResult};
pub use payload::{CustomizationLevel, CustomizationPayload, QuestionSpec};
pub use record::{CustomizationRecord, InsertedQuestion};
