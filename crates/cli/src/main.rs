//! padctl - padbridge inspection CLI
//!
//! Shows which driver a device binds to, decodes single reports and replays
//! JSON captures of transport events through the lifecycle manager.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod capture;
mod commands;
mod error;
mod hex;
mod output;
mod replay;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use padbridge_engine::logging;

use crate::commands::IdentityArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "padctl")]
#[command(about = "Inspect padbridge controller bindings, reports and captures")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the driver a device identity binds to
    Bind(IdentityArgs),

    /// Decode one input report with the driver the identity binds to
    Decode {
        #[command(flatten)]
        identity: IdentityArgs,
        /// Report bytes in hex, report id first
        report: String,
    },

    /// Replay a JSON capture of transport events
    Replay {
        /// Capture file
        capture: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::verbosity_filter(cli.verbose)) {
        eprintln!("Logging unavailable: {}", e);
    }

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Bind(identity) => commands::bind::execute(identity, cli.json),
        Commands::Decode { identity, report } => {
            commands::decode::execute(identity, report, cli.json)
        }
        Commands::Replay { capture } => commands::replay::execute(capture, cli.json),
    }
}
