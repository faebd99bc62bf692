//! `flighttracker` - Look up live flight state and render it as text.
//!
//! This library turns a user-entered flight identifier into a formatted
//! status summary, using either the aviationstack flight API or the `OpenSky`
//! Network state vectors.
//!
//! ```no_run
//! use flighttracker::{Config, FlightLookupService};
//!
//! # async fn run() -> flighttracker::Result<()> {
//! let config = Config::load()?;
//! let service = FlightLookupService::from_config(&config)?;
//! println!("{}", service.lookup("UAL123").await);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod query;
pub mod record;
pub mod service;
pub mod source;

pub use config::{Config, SourceKind};
pub use dispatch::LookupDispatcher;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use query::FlightQuery;
pub use record::{Arrival, Departure, FlightRecord, Position};
pub use service::FlightLookupService;
pub use source::FlightSource;
