//! `flighttrack` - CLI for flighttracker
//!
//! This binary is the front-end for flight lookups: one-shot with `track`,
//! or line by line from stdin with `interactive`.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use flighttracker::cli::{Cli, Command, ConfigCommand, InteractiveCommand, TrackCommand};
use flighttracker::{init_logging, Config, FlightLookupService, LookupDispatcher, SourceKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Track(track_cmd) => handle_track(&config, &track_cmd).await,
        Command::Interactive(interactive_cmd) => {
            handle_interactive(&config, &interactive_cmd).await
        }
        Command::Config(config_cmd) => handle_config(&config, cli.config.as_deref(), config_cmd),
    }
}

fn build_service(
    config: &Config,
    source: Option<flighttracker::cli::SourceArg>,
) -> anyhow::Result<FlightLookupService> {
    let kind = source.map_or(config.lookup.source, SourceKind::from);
    FlightLookupService::with_source_kind(kind, config)
        .with_context(|| format!("setting up the {kind} source"))
}

async fn handle_track(config: &Config, cmd: &TrackCommand) -> anyhow::Result<()> {
    let service = build_service(config, cmd.source)?;

    if cmd.json {
        let value = match service.try_lookup(&cmd.flight).await {
            Ok(record) => serde_json::to_value(&record)?,
            Err(err) => serde_json::json!({ "error": err.display_text() }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", service.lookup(&cmd.flight).await);
    }
    Ok(())
}

async fn handle_interactive(config: &Config, cmd: &InteractiveCommand) -> anyhow::Result<()> {
    let service = build_service(config, cmd.source)?;
    let dispatcher = LookupDispatcher::new(service, config.lookup.cancel_superseded);
    let mut display = dispatcher.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", dispatcher.current());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("reading stdin")? {
                    Some(line) => dispatcher.submit(&line),
                    None => break,
                }
            }
            changed = display.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                println!("\n{}", *display.borrow_and_update());
            }
        }
    }

    // Input closed; let the last lookup finish before exiting.
    dispatcher.wait_idle().await;
    if display.has_changed().unwrap_or(false) {
        println!("\n{}", *display.borrow_and_update());
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<&Path>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Lookup]");
                println!("  Source:             {}", config.lookup.source);
                println!(
                    "  Cancel superseded:  {}",
                    config.lookup.cancel_superseded
                );
                println!();
                println!("[aviationstack]");
                println!("  Base URL:           {}", config.aviationstack.base_url);
                println!(
                    "  Access key:         {}",
                    if config.has_access_key() {
                        "set"
                    } else {
                        "not set"
                    }
                );
                println!();
                println!("[OpenSky]");
                println!("  Base URL:           {}", config.opensky.base_url);
                println!();
                println!("[HTTP]");
                match config.http.timeout_secs {
                    Some(secs) => println!("  Timeout:            {secs}s"),
                    None => println!("  Timeout:            client default"),
                }
                println!("  User agent:         {}", config.http.user_agent);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
