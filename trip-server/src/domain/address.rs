//! User-supplied address text.

use std::fmt;

use super::DomainError;

/// A free-text address as typed by the user.
///
/// The only invariant is that it is non-empty after trimming. The trimmed
/// text is what gets geocoded and cached; no other normalization happens
/// here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Parse an address, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the address text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressQuery({:?})", self.0)
    }
}

impl fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
