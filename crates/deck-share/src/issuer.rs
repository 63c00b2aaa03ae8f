//! Token generation and collision retries.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, warn};

use crate::config::ShareConfig;
use crate::error::{ShareError, ShareResult};
use crate::token::{ShareToken, TOKEN_ALPHABET, TOKEN_LENGTH};

/// Draws share tokens and retries on collision.
///
/// The RNG is locked only while a candidate is drawn; existence checks run
/// unlocked, so concurrent issuers sharing one `TokenIssuer` do not wait on
/// each other's storage round-trips.
#[derive(Debug)]
pub struct TokenIssuer {
    rng: Mutex<StdRng>,
    max_attempts: u32,
}

impl TokenIssuer {
    /// Create an issuer from the share configuration.
    pub fn new(config: &ShareConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
            max_attempts: config.max_attempts,
        }
    }

    /// The number of candidates tried before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw one token uniformly from the alphabet.
    pub fn generate(&self) -> ShareToken {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let chars = (0..TOKEN_LENGTH)
            .map(|_| char::from(TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())]))
            .collect();
        ShareToken::from_alphabet(chars)
    }

    /// Draw tokens until `exists` reports one as free.
    ///
    /// Fails with [`ShareError::ExhaustedRetries`] after `max_attempts`
    /// collisions. Errors from `exists` are passed through.
    pub async fn issue_unique<F, Fut>(&self, mut exists: F) -> ShareResult<ShareToken>
    where
        F: FnMut(ShareToken) -> Fut,
        Fut: Future<Output = ShareResult<bool>>,
    {
        for attempt in 1..=self.max_attempts {
            let token = self.generate();
            if !exists(token.clone()).await? {
                debug!(attempt, "share token issued");
                return Ok(token);
            }
            warn!(attempt, token = %token, "share token collision");
        }
        error!(attempts = self.max_attempts, "no free share token");
        Err(ShareError::ExhaustedRetries {
            attempts: self.max_attempts,
        })
    }
}
