//! Callsign scan over every state vector `OpenSky` currently tracks.
//!
//! `GET {base}/states/all` returns `{"time": .., "states": [[..], ..]}` where
//! each state vector is a positional array:
//!
//! | index | field |
//! |---|---|
//! | 0 | icao24 |
//! | 1 | callsign (space padded to 8) |
//! | 2 | origin country |
//! | 5 | longitude |
//! | 6 | latitude |
//! | 7 | barometric altitude, m |
//! | 8 | on ground |
//! | 9 | velocity, m/s |
//! | 10 | true track, degrees |
//! | 11 | vertical rate, m/s |

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{endpoint, lenient, read_success_body, FlightSource};
use crate::config::SourceKind;
use crate::error::{Error, Result};
use crate::query::FlightQuery;
use crate::record::{FlightRecord, Position};

const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const ORIGIN_COUNTRY: usize = 2;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const ON_GROUND: usize = 8;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;
const VERTICAL_RATE: usize = 11;

const MPS_TO_KMH: f64 = 3.6;

/// Scans `GET {base}/states/all` for the first callsign containing the query.
#[derive(Debug)]
pub struct OpenSkySource {
    client: Client,
    url: String,
}

impl OpenSkySource {
    /// Create a source rooted at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: endpoint(base_url, "states/all"),
        }
    }
}

#[async_trait::async_trait]
impl FlightSource for OpenSkySource {
    fn kind(&self) -> SourceKind {
        SourceKind::OpenSky
    }

    async fn fetch(&self, query: &FlightQuery) -> Result<FlightRecord> {
        debug!(flight = %query, "scanning OpenSky state vectors");

        let body = read_success_body(self.kind(), self.client.get(&self.url)).await?;
        let response: StatesResponse = serde_json::from_str(&body)?;
        let states = response.states.unwrap_or_default();

        let found = find_first_match(&states, query);
        debug!(
            scanned = found.map_or(states.len(), |(index, _)| index + 1),
            total = states.len(),
            "scan finished"
        );

        let (_, state) = found.ok_or_else(|| Error::no_match(query.raw()))?;
        let record = state.into_record();
        info!(
            flight = %query,
            callsign = record.callsign_or_code.as_deref().unwrap_or("unknown"),
            "state vector matched"
        );
        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Value>>,
}

/// Linear first-match scan. Vectors that are not arrays or carry no string
/// callsign never match.
fn find_first_match<'a>(
    states: &'a [Value],
    query: &FlightQuery,
) -> Option<(usize, StateVector<'a>)> {
    states.iter().enumerate().find_map(|(index, state)| {
        let fields = state.as_array()?;
        let callsign = fields.get(CALLSIGN)?.as_str()?;
        query
            .matches_callsign(callsign)
            .then_some((index, StateVector { fields }))
    })
}

/// A borrowed positional state vector.
#[derive(Debug, Clone, Copy)]
struct StateVector<'a> {
    fields: &'a [Value],
}

impl StateVector<'_> {
    fn text(&self, index: usize) -> Option<String> {
        self.fields
            .get(index)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn number(&self, index: usize) -> f64 {
        self.fields
            .get(index)
            .and_then(lenient::number)
            .unwrap_or(f64::NAN)
    }

    fn flag(&self, index: usize) -> bool {
        self.fields
            .get(index)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn into_record(self) -> FlightRecord {
        FlightRecord {
            callsign_or_code: self.text(CALLSIGN).or_else(|| self.text(ICAO24)),
            airline: None,
            status: None,
            origin_country: self.text(ORIGIN_COUNTRY),
            departure: None,
            arrival: None,
            position: Some(Position {
                latitude: self.number(LATITUDE),
                longitude: self.number(LONGITUDE),
                altitude: self.number(BARO_ALTITUDE),
                ground_speed: self.number(VELOCITY) * MPS_TO_KMH,
                vertical_speed: self.number(VERTICAL_RATE),
                heading: self.number(TRUE_TRACK),
                on_ground: self.flag(ON_GROUND),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::logging::init_test_logging;

    fn vector(icao: &str, callsign: &str, country: &str) -> Value {
        json!([
            icao,
            callsign,
            country,
            1_760_688_000,
            1_760_688_001,
            -122.375,
            37.619,
            3048.0,
            false,
            200.0,
            284.5,
            6.5,
            null,
            3100.0,
            "1200",
            false,
            0
        ])
    }

    async fn server_with(states: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/states/all"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"time": 1_760_688_005, "states": states})),
            )
            .mount(&server)
            .await;
        server
    }

    fn source_for(server: &MockServer) -> OpenSkySource {
        init_test_logging();
        OpenSkySource::new(Client::new(), &format!("{}/api", server.uri()))
    }

    fn query(identifier: &str) -> FlightQuery {
        FlightQuery::parse(identifier).unwrap()
    }

    #[tokio::test]
    async fn test_padded_callsign_matches_case_insensitively() {
        let server = server_with(json!([
            vector("a1b2c3", "UAL123  ", "United States"),
            vector("d4e5f6", "DAL456  ", "United States"),
        ]))
        .await;

        let record = source_for(&server).fetch(&query("ual123")).await.unwrap();
        assert_eq!(record.callsign_or_code.as_deref(), Some("UAL123"));
        assert_eq!(record.origin_country.as_deref(), Some("United States"));
        assert!(record.departure.is_none());
        assert!(record.arrival.is_none());

        let position = record.position.unwrap();
        assert!((position.latitude - 37.619).abs() < 1e-9);
        assert!((position.longitude + 122.375).abs() < 1e-9);
        assert!((position.ground_speed - 720.0).abs() < 1e-9);
        assert!((position.heading - 284.5).abs() < 1e-9);
        assert!(!position.on_ground);
    }

    #[tokio::test]
    async fn test_first_match_in_array_order_wins() {
        let server = server_with(json!([
            vector("000001", "DAL456  ", "United States"),
            vector("000002", "UAL1234 ", "United States"),
            vector("000003", "UAL123  ", "Canada"),
        ]))
        .await;

        let record = source_for(&server).fetch(&query("UAL123")).await.unwrap();
        assert_eq!(record.callsign_or_code.as_deref(), Some("UAL1234"));
    }

    #[tokio::test]
    async fn test_no_match_reports_raw_identifier() {
        let server = server_with(json!([vector("a1b2c3", "DAL456  ", "United States")])).await;

        let err = source_for(&server).fetch(&query("ual123")).await.unwrap_err();
        assert_eq!(err.display_text(), "No matching flight found for: ual123");
    }

    #[tokio::test]
    async fn test_null_states_is_no_match() {
        let server = server_with(Value::Null).await;

        let err = source_for(&server).fetch(&query("UAL1")).await.unwrap_err();
        assert!(matches!(err, Error::NoMatch { .. }));
    }

    #[tokio::test]
    async fn test_odd_vectors_are_skipped() {
        let server = server_with(json!([
            "not-a-vector",
            ["abc123"],
            ["abc124", null, "Nowhere"],
            ["abc125", "UAL9", "Germany"],
        ]))
        .await;

        let record = source_for(&server).fetch(&query("ual9")).await.unwrap();
        assert_eq!(record.origin_country.as_deref(), Some("Germany"));
        let position = record.position.unwrap();
        assert!(position.latitude.is_nan());
        assert!(position.altitude.is_nan());
        assert!(position.ground_speed.is_nan());
        assert!(!position.on_ground);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch(&query("UAL1")).await.unwrap_err();
        assert_eq!(err.display_text(), "API error: 503");
    }

    #[test]
    fn test_blank_callsign_falls_back_to_icao24() {
        let state = json!(["a1b2c3", "        ", "Ireland"]);
        let fields = state.as_array().unwrap();
        let record = StateVector { fields }.into_record();
        assert_eq!(record.callsign_or_code.as_deref(), Some("a1b2c3"));
    }

    #[test]
    fn test_scan_stops_at_first_match() {
        let states = vec![
            vector("1", "ABC1", "A"),
            vector("2", "ABC2", "B"),
            vector("3", "XYZ", "C"),
        ];
        let (index, state) = find_first_match(&states, &query("abc")).unwrap();
        assert_eq!(index, 0);
        assert_eq!(state.text(ORIGIN_COUNTRY).as_deref(), Some("A"));
    }
}
