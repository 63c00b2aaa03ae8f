//! Error types for flow control.

use thiserror::Error;

/// Result type for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur while computing slide transitions.
#[derive(Debug, Error)]
pub enum FlowError {
    /// No transition table is registered for this family.
    #[error("unknown flow family: {0}")]
    UnknownFamily(String),

    /// The deck has no slides to start from.
    #[error("flow family \"{0}\" was given an empty deck")]
    EmptyDeck(String),

    /// The current slide is not part of the deck.
    #[error("unknown branch: slide \"{slide}\" is not in the \"{family}\" deck")]
    UnknownSlide {
        /// Flow family.
        family: String,
        /// The slide id that could not be found.
        slide: String,
    },

    /// A transition points at a slide the deck does not contain.
    #[error("unknown branch: \"{from}\" leads to missing slide \"{target}\" in family \"{family}\"")]
    DanglingTarget {
        /// Flow family.
        family: String,
        /// Slide the transition starts from.
        from: String,
        /// The missing target.
        target: String,
    },
}
