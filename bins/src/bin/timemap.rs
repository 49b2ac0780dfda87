// SPDX-License-Identifier: MIT

//!
//! The timemap command line tool
//!

use clap::{CommandFactory, Parser, ValueEnum, builder::PossibleValue};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;
use timemap_plugins::PageDescription;

#[macro_use]
extern crate log;
extern crate simplelog;

/// timemap entry point
///
/// One of:
/// - Render a page description to HTML
/// - Check a page description builds and renders
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config_log = ConfigBuilder::new().add_filter_allow_str("timemap").build();
    CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    // Load the page
    let page = match PageDescription::load(&args.page) {
        Ok(page) => page,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    // Render it
    let html = match page.render() {
        Ok(html) => html,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    match (&args.cli_command, &args.output) {
        //----------------------------------------------------------------------
        // Valid
        //----------------------------------------------------------------------
        (Command::Render, Some(output)) => match std::fs::write(output, html) {
            Ok(()) => info!("Wrote {}", output.display()),
            Err(error) => {
                eprintln!("Error writing {}: {error}", output.display());
                std::process::exit(1);
            }
        },
        (Command::Render, None) => println!("{html}"),
        (Command::Check, None) => println!("OK"),
        //----------------------------------------------------------------------
        // Invalid
        //----------------------------------------------------------------------
        (Command::Check, Some(_)) => {
            eprintln!("CLI Error: invalid options");
            Cli::command().print_long_help()?;
            std::process::exit(1);
        }
    }

    Ok(())
}

/// timemap CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Render Leaflet maps with time controlled WMS layers",
    after_help = "The page description is a JSON file (map, WMS layers, time control)"
)]
pub struct Cli {
    #[arg(value_enum)]
    pub cli_command: Command,

    /// Path to the JSON page description
    #[arg(long)]
    pub page: PathBuf,

    /// Path to write the HTML to (stdout if not given)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log debug messages
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub enum Command {
    Render,
    Check,
}

impl ValueEnum for Command {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Render, Self::Check]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Command::Render => Some(
                PossibleValue::new("render").help("Render the page description to an HTML file"),
            ),
            Command::Check => Some(
                PossibleValue::new("check")
                    .help("Check the page description builds and renders (no output)"),
            ),
        }
    }
}
