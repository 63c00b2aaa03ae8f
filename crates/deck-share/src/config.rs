//! Share configuration.

use crate::token::ShareToken;

/// Origin used for share links when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
/// Token candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
/// Upper bound for `max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 16;

/// Configuration for token issuance and share links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Scheme and host share links are built on, without a trailing slash.
    pub origin: String,
    /// Token candidates tried before giving up (1-16).
    pub max_attempts: u32,
    /// RNG seed for reproducible tokens. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl ShareConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link origin. Trailing slashes are dropped.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    /// Set the attempt bound (clamped to 1-16).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.clamp(1, MAX_ATTEMPTS_LIMIT);
        self
    }

    /// Seed the token RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The link a recipient opens to view a shared deck.
    pub fn share_link(&self, token: &ShareToken) -> String {
        format!("{}/view/{token}", self.origin)
    }
}
