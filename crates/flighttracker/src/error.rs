//! Error types for flighttracker.
//!
//! Every failure a lookup can hit is a variant of [`Error`]. The lookup
//! service never hands these to its caller directly: each one maps to exactly
//! one line of display text through [`Error::display_text`].

use std::path::PathBuf;
use thiserror::Error;

/// Display text for a blank identifier.
pub const EMPTY_INPUT_TEXT: &str = "Please enter a valid flight number";

/// Display text prefix for transport, parse and configuration failures.
pub const FETCH_FAILED_TEXT: &str = "Error fetching flight data";

/// Display text when a keyed lookup returns no flights.
pub const NO_DATA_TEXT: &str = "No flight data available";

/// The main error type for flighttracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    /// The identifier was empty or whitespace only.
    #[error("flight identifier is blank")]
    EmptyInput,

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The data source answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    Http {
        /// The status code returned.
        status: u16,
    },

    /// The data source answered 200 but reported an error in the body.
    #[error("data source reported error '{code}'")]
    Api {
        /// The provider's error code.
        code: String,
    },

    /// A well-formed response carried no flights.
    #[error("no flight data in response")]
    NoData,

    /// A full state scan found no callsign containing the identifier.
    #[error("no state vector matches '{identifier}'")]
    NoMatch {
        /// The identifier as the user entered it.
        identifier: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// The aviationstack source was selected without an access key.
    #[error(
        "aviationstack requires an access key; set FLIGHTTRACKER_AVIATIONSTACK__ACCESS_KEY \
         or aviationstack.access_key in {}",
        .config_path.display()
    )]
    MissingAccessKey {
        /// Where the config file would be read from.
        config_path: PathBuf,
    },
}

/// A specialized Result type for flighttracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a no-match error for the given raw identifier.
    #[must_use]
    pub fn no_match(identifier: impl Into<String>) -> Self {
        Self::NoMatch {
            identifier: identifier.into(),
        }
    }

    /// Check if this error means the lookup completed but found nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoData | Self::NoMatch { .. })
    }

    /// The single line shown to the user for this failure.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::EmptyInput => EMPTY_INPUT_TEXT.to_string(),
            Self::Http { status } => format!("API error: {status}"),
            Self::Api { code } => format!("API error: {code}"),
            Self::NoData => NO_DATA_TEXT.to_string(),
            Self::NoMatch { identifier } => {
                format!("No matching flight found for: {identifier}")
            }
            Self::Transport(err) => format!("{FETCH_FAILED_TEXT}: {}", transport_diagnostic(err)),
            other => format!("{FETCH_FAILED_TEXT}: {other}"),
        }
    }
}

/// Short description of a transport failure. Never includes the request
/// URL, which carries the access key for keyed sources.
fn transport_diagnostic(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_decode() || err.is_body() {
        "could not read response body"
    } else {
        "request failed"
    }
}
