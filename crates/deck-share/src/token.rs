//! Share tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ShareError, ShareResult};

/// Number of characters in a share token.
pub const TOKEN_LENGTH: usize = 12;

/// Characters a token is drawn from. Upper case only, without the easily
/// confused `I`, `O`, `0` and `1`.
pub const TOKEN_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// An opaque identifier gating access to one shared deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareToken(String);

impl ShareToken {
    /// Parse a token typed or pasted by a person.
    ///
    /// Surrounding whitespace is ignored and lower case is accepted.
    pub fn parse(input: &str) -> ShareResult<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() == TOKEN_LENGTH && normalized.bytes().all(is_token_byte) {
            Ok(Self(normalized))
        } else {
            Err(ShareError::InvalidToken(input.to_string()))
        }
    }

    /// Build a token from characters already drawn from the alphabet.
    pub(crate) fn from_alphabet(chars: String) -> Self {
        debug_assert!(chars.len() == TOKEN_LENGTH && chars.bytes().all(is_token_byte));
        Self(chars)
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_token_byte(b: u8) -> bool {
    TOKEN_ALPHABET.contains(&b)
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareToken {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShareToken {
    type Error = ShareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShareToken> for String {
    fn from(token: ShareToken) -> Self {
        token.0
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_excludes_confusables() {
        assert_eq!(TOKEN_ALPHABET.len(), 32);
        for c in [b'I', b'O', b'0', b'1'] {
            assert!(!TOKEN_ALPHABET.contains(&c));
        }
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let token = ShareToken::parse("  abcdefghjk23 ").unwrap();
        assert_eq!(token.as_str(), "ABCDEFGHJK23");
        assert_eq!(token.to_string(), "ABCDEFGHJK23");
    }

    #[test]
    fn parse_rejects_bad_tokens() {
        for bad in ["", "ABCDEFGHJK2", "ABCDEFGHJK234", "ABCDEFGHJKO3", "ABCDEFGHJK-3"] {
            assert!(
                matches!(ShareToken::parse(bad), Err(ShareError::InvalidToken(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let token: ShareToken = "MNPQRSTUVWXY".parse().unwrap();
        assert_eq!(token, ShareToken::parse("mnpqrstuvwxy").unwrap());
    }

    #[test]
    fn serde_is_a_plain_string() {
        let token = ShareToken::parse("ABCDEFGHJK23").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"ABCDEFGHJK23\"");
        let back: ShareToken = serde_json::from_str("\"abcdefghjk23\"").unwrap();
        assert_eq!(back, token);
        assert!(serde_json::from_str::<ShareToken>("\"nope\"").is_err());
    }
}
