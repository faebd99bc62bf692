//! Flight-data sources.
//!
//! A [`FlightSource`] turns one [`FlightQuery`] into one [`FlightRecord`] by
//! issuing a single HTTP request. Two implementations exist:
//!
//! - [`AviationstackSource`]: keyed lookup of one flight code.
//! - [`OpenSkySource`]: scan of every tracked state vector for a callsign.

mod aviationstack;
mod lenient;
mod opensky;

pub use aviationstack::AviationstackSource;
pub use opensky::OpenSkySource;

use std::fmt;

use reqwest::{Client, Response};
use tracing::warn;

use crate::config::{Config, HttpConfig, SourceKind};
use crate::error::{Error, Result};
use crate::query::FlightQuery;
use crate::record::FlightRecord;

/// A place flight records come from.
#[async_trait::async_trait]
pub trait FlightSource: Send + Sync + fmt::Debug {
    /// Which kind of source this is.
    fn kind(&self) -> SourceKind;

    /// Fetch the record for a query with exactly one outbound request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response is not a success,
    /// the body is malformed, or no flight matches.
    async fn fetch(&self, query: &FlightQuery) -> Result<FlightRecord>;
}

/// Build the source selected by `kind` from configuration.
///
/// # Errors
///
/// Returns [`Error::MissingAccessKey`] if aviationstack is selected without a
/// key, or a transport error if the HTTP client cannot be built.
pub fn build_source(kind: SourceKind, config: &Config) -> Result<Box<dyn FlightSource>> {
    let client = http_client(&config.http)?;

    match kind {
        SourceKind::Aviationstack => {
            let access_key = config.aviationstack.access_key.clone().ok_or_else(|| {
                Error::MissingAccessKey {
                    config_path: Config::default_config_path(),
                }
            })?;
            Ok(Box::new(AviationstackSource::new(
                client,
                &config.aviationstack.base_url,
                access_key,
            )))
        }
        SourceKind::OpenSky => Ok(Box::new(OpenSkySource::new(
            client,
            &config.opensky.base_url,
        ))),
    }
}

/// Build the shared HTTP client. No timeout is set unless configured.
///
/// # Errors
///
/// Returns a transport error if the TLS backend cannot be initialised.
pub fn http_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Join an API root and an endpoint path.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send a prepared request and read the body of a success response.
///
/// The request URL is stripped from transport errors since it may carry
/// credentials.
async fn read_success_body(
    source: SourceKind,
    request: reqwest::RequestBuilder,
) -> Result<String> {
    let response: Response = request
        .send()
        .await
        .map_err(|e| Error::Transport(e.without_url()))?;

    let status = response.status();
    if !status.is_success() {
        warn!(%source, status = status.as_u16(), "data source returned an error status");
        return Err(Error::Http {
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| Error::Transport(e.without_url()))
}
