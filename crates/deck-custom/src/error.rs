//! Error types for customization.

use deck_core::DeckError;
use thiserror::Error;

/// Result type for customization operations.
pub type CustomizeResult<T> = Result<T, CustomizeError>;

/// Errors that can occur while customizing a template.
#[derive(Debug, Error)]
pub enum CustomizeError {
    /// The payload is malformed; nothing was produced.
    #[error("invalid customization: {0}")]
    Validation(String),

    /// Template lookup or structure error.
    #[error(transparent)]
    Deck(#[from] DeckError),
}
