//! Command-line interface for flighttracker.
//!
//! This module provides the CLI structure for the `flighttrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, InteractiveCommand, SourceArg, TrackCommand};

/// flighttrack - Look up live flight state
///
/// Type a flight number or callsign and get a text summary of where the
/// flight is, using either aviationstack or the `OpenSky` Network.
#[derive(Debug, Parser)]
#[command(name = "flighttrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one flight and print its summary
    Track(TrackCommand),

    /// Read flight numbers from stdin and print each result as it arrives
    Interactive(InteractiveCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "flighttrack");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(2, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_track() {
        let cli = Cli::try_parse_from(["flighttrack", "track", "UA123"]).unwrap();
        match cli.command {
            Command::Track(cmd) => {
                assert_eq!(cmd.flight, "UA123");
                assert!(cmd.source.is_none());
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_track_with_source_and_json() {
        let cli = Cli::try_parse_from([
            "flighttrack",
            "track",
            "--source",
            "aviationstack",
            "--json",
            "ua123",
        ])
        .unwrap();
        match cli.command {
            Command::Track(cmd) => {
                assert_eq!(cmd.source, Some(SourceArg::Aviationstack));
                assert!(cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_track_requires_flight() {
        assert!(Cli::try_parse_from(["flighttrack", "track"]).is_err());
    }

    #[test]
    fn test_parse_interactive() {
        let cli = Cli::try_parse_from(["flighttrack", "interactive", "-s", "opensky"]).unwrap();
        match cli.command {
            Command::Interactive(cmd) => assert_eq!(cmd.source, Some(SourceArg::Opensky)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["flighttrack", "-c", "/custom/config.toml", "config", "show"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["flighttrack", "-vv", "config", "path"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["flighttrack", "-q", "config", "path"]).unwrap();
        assert!(cli.quiet);
    }
}
