//! The per-action lookup request.

use crate::error::{Error, Result};

/// A normalized flight identifier, built once per user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    identifier: String,
    raw: String,
}

impl FlightQuery {
    /// Build a query from user input.
    ///
    /// The identifier is trimmed and upper-cased; the input is also kept
    /// exactly as typed for messages shown back to the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if the input is empty or whitespace only.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self {
            identifier: trimmed.to_uppercase(),
            raw: input.to_string(),
        })
    }

    /// The normalized identifier used for matching and request parameters.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The input as the user typed it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether a source callsign contains this identifier after the same
    /// normalization.
    #[must_use]
    pub fn matches_callsign(&self, callsign: &str) -> bool {
        callsign.trim().to_uppercase().contains(&self.identifier)
    }
}

impl std::fmt::Display for FlightQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identifier)
    }
}
