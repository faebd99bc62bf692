//! Rendering a [`FlightRecord`] as display text.
//!
//! The template is fixed-shape: every line of a section is always written,
//! with "Unknown" standing in for absent text and "N/A" for absent numbers.
//! Sections appear when the record carries them.

use std::fmt;

use crate::record::{Arrival, Departure, FlightRecord, Position};

/// Placeholder for absent text fields.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for absent numeric fields.
pub const NOT_AVAILABLE: &str = "N/A";

const RULE: &str = "---------------------------";

/// Render a record as a multi-line block. Pure: the same record always
/// renders to the same bytes.
#[must_use]
pub fn render(record: &FlightRecord) -> String {
    Summary(record).to_string()
}

/// Display adapter over a borrowed record.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(pub &'a FlightRecord);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;

        writeln!(f, "Flight Information")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Flight: {}", text(record.callsign_or_code.as_deref()))?;
        writeln!(f, "Airline: {}", text(record.airline.as_deref()))?;
        writeln!(f, "Status: {}", text(record.status.as_deref()))?;
        write!(f, "Origin country: {}", text(record.origin_country.as_deref()))?;

        if let Some(departure) = &record.departure {
            write_departure(f, departure)?;
        }
        if let Some(arrival) = &record.arrival {
            write_arrival(f, arrival)?;
        }
        if let Some(position) = &record.position {
            write_position(f, position)?;
        }
        Ok(())
    }
}

fn write_departure(f: &mut fmt::Formatter<'_>, departure: &Departure) -> fmt::Result {
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "Departure:")?;
    writeln!(f, "  Airport: {}", text(departure.airport.as_deref()))?;
    writeln!(
        f,
        "  Estimated time: {}",
        text(departure.estimated_time.as_deref())
    )?;
    writeln!(
        f,
        "  Terminal: {} | Gate: {}",
        text(departure.terminal.as_deref()),
        text(departure.gate.as_deref())
    )?;
    match departure.delay_minutes {
        None | Some(0) => write!(f, "  Delay: No delay"),
        Some(minutes) => write!(f, "  Delay: {minutes} minutes"),
    }
}

fn write_arrival(f: &mut fmt::Formatter<'_>, arrival: &Arrival) -> fmt::Result {
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "Arrival:")?;
    writeln!(f, "  Airport: {}", text(arrival.airport.as_deref()))?;
    writeln!(
        f,
        "  Estimated time: {}",
        text(arrival.estimated_time.as_deref())
    )?;
    writeln!(
        f,
        "  Terminal: {} | Gate: {}",
        text(arrival.terminal.as_deref()),
        text(arrival.gate.as_deref())
    )?;
    write!(
        f,
        "  Baggage claim: {}",
        text(arrival.baggage_claim.as_deref())
    )
}

fn write_position(f: &mut fmt::Formatter<'_>, position: &Position) -> fmt::Result {
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "Live Position:")?;
    writeln!(f, "{RULE}")?;
    writeln!(
        f,
        "  Latitude: {} | Longitude: {}",
        measure(position.latitude, 4, ""),
        measure(position.longitude, 4, "")
    )?;
    writeln!(f, "  Altitude: {}", measure(position.altitude, 0, " m"))?;
    writeln!(
        f,
        "  Speed: {} | Vertical speed: {}",
        measure(position.ground_speed, 1, " km/h"),
        measure(position.vertical_speed, 1, " m/s")
    )?;
    writeln!(f, "  Heading: {}", measure(position.heading, 0, "°"))?;
    write!(
        f,
        "  On ground: {}",
        if position.on_ground { "yes" } else { "no" }
    )
}

fn text(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN,
    }
}

fn measure(value: f64, precision: usize, unit: &str) -> String {
    if value.is_finite() {
        format!("{value:.precision$}{unit}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}
