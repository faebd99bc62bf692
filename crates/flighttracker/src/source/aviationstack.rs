//! Keyed per-flight lookup against the aviationstack `/flights` endpoint.

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{endpoint, lenient, read_success_body, FlightSource};
use crate::config::SourceKind;
use crate::error::{Error, Result};
use crate::query::FlightQuery;
use crate::record::{Arrival, Departure, FlightRecord, Position};

/// Looks up one flight code with `GET {base}/flights?access_key=..&flight_iata=..`.
pub struct AviationstackSource {
    client: Client,
    url: String,
    access_key: String,
}

impl AviationstackSource {
    /// Create a source rooted at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: &str, access_key: String) -> Self {
        Self {
            client,
            url: endpoint(base_url, "flights"),
            access_key,
        }
    }
}

impl fmt::Debug for AviationstackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AviationstackSource")
            .field("url", &self.url)
            .field("access_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl FlightSource for AviationstackSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Aviationstack
    }

    async fn fetch(&self, query: &FlightQuery) -> Result<FlightRecord> {
        debug!(flight = %query, "querying aviationstack");

        let request = self.client.get(&self.url).query(&[
            ("access_key", self.access_key.as_str()),
            ("flight_iata", query.identifier()),
        ]);
        let body = read_success_body(self.kind(), request).await?;
        let response: FlightsResponse = serde_json::from_str(&body)?;

        if let Some(error) = response.error {
            let code = error.code.unwrap_or_else(|| "unknown".to_string());
            warn!(code = %code, message = ?error.message, "aviationstack reported an error");
            return Err(Error::Api { code });
        }

        let flight = response
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(Error::NoData)?;

        let record = flight.into_record();
        info!(
            flight = %query,
            status = record.status.as_deref().unwrap_or("unknown"),
            "flight found"
        );
        Ok(record)
    }
}

// === Wire format ===

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Option<Vec<FlightEntry>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default, deserialize_with = "lenient::string")]
    code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlightEntry {
    #[serde(deserialize_with = "lenient::string")]
    flight_status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    flight_iata: Option<String>,
    #[serde(deserialize_with = "lenient::object")]
    airline: Option<NamedEntity>,
    #[serde(deserialize_with = "lenient::object")]
    flight: Option<FlightCodes>,
    #[serde(deserialize_with = "lenient::object")]
    departure: Option<DepartureEntry>,
    #[serde(deserialize_with = "lenient::object")]
    arrival: Option<ArrivalEntry>,
    #[serde(deserialize_with = "lenient::object")]
    live: Option<LiveEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NamedEntity {
    #[serde(deserialize_with = "lenient::string")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlightCodes {
    #[serde(deserialize_with = "lenient::string")]
    iata: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DepartureEntry {
    #[serde(deserialize_with = "lenient::string")]
    airport: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    estimated: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    terminal: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    gate: Option<String>,
    #[serde(deserialize_with = "lenient::minutes")]
    delay: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArrivalEntry {
    #[serde(deserialize_with = "lenient::string")]
    airport: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    estimated: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    terminal: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    gate: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    baggage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LiveEntry {
    #[serde(deserialize_with = "lenient::float")]
    latitude: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    longitude: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    altitude: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    speed_horizontal: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    speed_vertical: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    direction: Option<f64>,
    #[serde(deserialize_with = "lenient::flag")]
    is_ground: Option<bool>,
}

impl FlightEntry {
    /// Every section is present in the result so the rendered block keeps
    /// its full shape even when the provider omits a sub-object.
    fn into_record(self) -> FlightRecord {
        let code = self
            .flight
            .and_then(|codes| codes.iata)
            .or(self.flight_iata);
        let departure = self.departure.unwrap_or_default();
        let arrival = self.arrival.unwrap_or_default();
        let live = self.live.unwrap_or_default();

        FlightRecord {
            callsign_or_code: code,
            airline: self.airline.and_then(|airline| airline.name),
            status: self.flight_status,
            origin_country: None,
            departure: Some(Departure {
                airport: departure.airport,
                estimated_time: departure.estimated,
                terminal: departure.terminal,
                gate: departure.gate,
                delay_minutes: departure.delay,
            }),
            arrival: Some(Arrival {
                airport: arrival.airport,
                estimated_time: arrival.estimated,
                terminal: arrival.terminal,
                gate: arrival.gate,
                baggage_claim: arrival.baggage,
            }),
            position: Some(Position {
                latitude: live.latitude.unwrap_or(f64::NAN),
                longitude: live.longitude.unwrap_or(f64::NAN),
                altitude: live.altitude.unwrap_or(f64::NAN),
                ground_speed: live.speed_horizontal.unwrap_or(f64::NAN),
                vertical_speed: live.speed_vertical.unwrap_or(f64::NAN),
                heading: live.direction.unwrap_or(f64::NAN),
                on_ground: live.is_ground.unwrap_or(false),
            }),
        }
    }
}
