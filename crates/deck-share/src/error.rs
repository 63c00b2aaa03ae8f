//! Error types for sharing.

use deck_custom::CustomizeError;
use deck_flow::FlowError;
use thiserror::Error;

use crate::store::InstanceId;

/// Result type for sharing operations.
pub type ShareResult<T> = Result<T, ShareError>;

/// Errors that can occur while issuing tokens or storing shared decks.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Every candidate token collided.
    #[error("no free share token after {attempts} attempts")]
    ExhaustedRetries {
        /// How many candidates were tried.
        attempts: u32,
    },

    /// The string is not a well-formed share token.
    #[error("invalid share token: {0:?}")]
    InvalidToken(String),

    /// No deck is stored under this token.
    #[error("share token not found: {0}")]
    TokenNotFound(String),

    /// No deck instance with this id.
    #[error("deck instance not found: {0}")]
    InstanceNotFound(InstanceId),

    /// The token was taken between the existence check and the save.
    #[error("share token already in use: {0}")]
    Conflict(String),

    /// The persistence backend failed.
    #[error("store error: {0}")]
    Store(String),

    /// Inserted question slides that no flow path visits.
    #[error("question slide(s) in \"{template}\" can never be reached: {}", slides.join(", "))]
    UnreachableQuestions {
        /// Template id.
        template: String,
        /// The stranded slide ids.
        slides: Vec<String>,
    },

    /// The deck's flow family could not be evaluated.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Customizing the deck failed before it could be published.
    #[error(transparent)]
    Customize(#[from] CustomizeError),
}

impl ShareError {
    /// Whether trying again with a new token may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExhaustedRetries { .. } | Self::Conflict(_))
    }
}
