//! Share tokens and deck publishing for Deckhand.
//!
//! A customized deck is handed to a [`DeckStore`] under a freshly issued
//! [`ShareToken`]; the recipient later opens it through the share link and
//! their answers are recorded against the stored instance.

/// Share configuration.
pub mod config;
/// Error types for sharing.
pub mod error;
/// Token generation and collision retries.
pub mod issuer;
/// Publishing customized decks.
pub mod publisher;
/// Persistence of shared decks.
pub mod store;
/// Share tokens.
pub mod token;

pub use config::ShareConfig;
pub use error::{ShareError, ShareResult};
pub use issuer::TokenIssuer;
pub use publisher::{Publication, Publisher};
pub use store::{DeckStore, InstanceId, MemoryStore, SharedDeck};
pub use token::ShareToken;
