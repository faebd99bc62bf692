//! The normalized flight record both data sources produce.
//!
//! Every field is optional at the source. Strings that are absent stay
//! `None`; numeric position values that are absent are stored as NaN. A
//! section (`departure`, `arrival`, `position`) is `Some` exactly when the
//! source that built the record supplies that section at all.

use serde::Serialize;

/// A flight, as far as one source can describe it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightRecord {
    /// Flight code (aviationstack) or callsign (`OpenSky`).
    pub callsign_or_code: Option<String>,
    /// Operating airline name.
    pub airline: Option<String>,
    /// Free-form flight status.
    pub status: Option<String>,
    /// Country the aircraft is registered in.
    pub origin_country: Option<String>,
    /// Departure leg details.
    pub departure: Option<Departure>,
    /// Arrival leg details.
    pub arrival: Option<Arrival>,
    /// Live position.
    pub position: Option<Position>,
}

/// Departure leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Airport name.
    pub airport: Option<String>,
    /// Estimated departure time, as the source formats it.
    pub estimated_time: Option<String>,
    /// Terminal.
    pub terminal: Option<String>,
    /// Gate.
    pub gate: Option<String>,
    /// Delay in minutes.
    pub delay_minutes: Option<i64>,
}

/// Arrival leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arrival {
    /// Airport name.
    pub airport: Option<String>,
    /// Estimated arrival time, as the source formats it.
    pub estimated_time: Option<String>,
    /// Terminal.
    pub terminal: Option<String>,
    /// Gate.
    pub gate: Option<String>,
    /// Baggage claim belt.
    pub baggage_claim: Option<String>,
}

/// Live position. NaN marks a value the source did not report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
    /// Ground speed in km/h.
    pub ground_speed: f64,
    /// Vertical speed in m/s, positive when climbing.
    pub vertical_speed: f64,
    /// Track in degrees clockwise from north.
    pub heading: f64,
    /// Whether the aircraft reports being on the ground.
    pub on_ground: bool,
}

impl Position {
    /// A position with nothing known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            latitude: f64::NAN,
            longitude: f64::NAN,
            altitude: f64::NAN,
            ground_speed: f64::NAN,
            vertical_speed: f64::NAN,
            heading: f64::NAN,
            on_ground: false,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_position() {
        let position = Position::unknown();
        assert!(position.latitude.is_nan());
        assert!(position.heading.is_nan());
        assert!(!position.on_ground);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let json = serde_json::to_value(Position::unknown()).unwrap();
        assert!(json["latitude"].is_null());
        assert_eq!(json["on_ground"], false);
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = FlightRecord::default();
        assert!(record.callsign_or_code.is_none());
        assert!(record.departure.is_none());
        assert!(record.position.is_none());
    }
}
