//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::SourceKind;

/// Track command arguments.
#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Flight number or callsign, e.g. UA123 or UAL123
    pub flight: String,

    /// Data source to query (overrides lookup.source)
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,

    /// Print the normalized record as JSON instead of the text summary
    #[arg(short, long)]
    pub json: bool,
}

/// Interactive command arguments.
#[derive(Debug, Args)]
pub struct InteractiveCommand {
    /// Data source to query (overrides lookup.source)
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Source argument for overriding the configured source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// aviationstack keyed flight lookup
    Aviationstack,
    /// `OpenSky` Network state vector scan
    Opensky,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Aviationstack => Self::Aviationstack,
            SourceArg::Opensky => Self::OpenSky,
        }
    }
}
