//! Map service credential.

use std::fmt;

use super::DomainError;

/// Minimum accepted key length. Vendor keys are 32 characters; anything
/// under 20 is certainly a paste error.
const MIN_KEY_LEN: usize = 20;

/// A map service API key.
///
/// Presence and length are the only local checks; whether the vendor
/// accepts it is only known after a live call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Parse a key, trimming whitespace and enforcing the minimum length.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.chars().count() < MIN_KEY_LEN {
            return Err(DomainError::InvalidApiKey { min: MIN_KEY_LEN });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the raw key for use in requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "ApiKey({prefix}…)")
    }
}
