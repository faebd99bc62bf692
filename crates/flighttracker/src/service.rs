//! The flight lookup service.
//!
//! [`FlightLookupService::lookup`] is the caller-facing contract: a string in,
//! a display string out, and no failure ever crosses back to the caller.

use tracing::{debug, info, instrument};

use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::format;
use crate::query::FlightQuery;
use crate::record::FlightRecord;
use crate::source::{build_source, FlightSource};

/// Turns user-entered flight identifiers into display text.
#[derive(Debug)]
pub struct FlightLookupService {
    source: Box<dyn FlightSource>,
}

impl FlightLookupService {
    /// Wrap an existing source.
    #[must_use]
    pub fn new(source: Box<dyn FlightSource>) -> Self {
        Self { source }
    }

    /// Build a service for the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be built, e.g. aviationstack
    /// without an access key.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_source_kind(config.lookup.source, config)
    }

    /// Build a service for `kind`, ignoring the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be built.
    pub fn with_source_kind(kind: SourceKind, config: &Config) -> Result<Self> {
        Ok(Self::new(build_source(kind, config)?))
    }

    /// Which source answers lookups.
    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Look up a flight and return the text to display.
    ///
    /// Blank input returns the empty-input text without touching the network.
    /// Every failure is rendered as its display text.
    pub async fn lookup(&self, identifier: &str) -> String {
        match self.try_lookup(identifier).await {
            Ok(record) => format::render(&record),
            Err(err) => {
                if err.is_not_found() {
                    info!(flight = identifier.trim(), "no flight found");
                } else {
                    debug!(error = %err, "lookup failed");
                }
                err.display_text()
            }
        }
    }

    /// Look up a flight and return the normalized record.
    ///
    /// # Errors
    ///
    /// Returns the typed failure; see [`crate::Error::display_text`] for how
    /// each one is shown.
    #[instrument(skip(self), fields(source = %self.source.kind()))]
    pub async fn try_lookup(&self, identifier: &str) -> Result<FlightRecord> {
        let query = FlightQuery::parse(identifier)?;
        self.source.fetch(&query).await
    }
}
