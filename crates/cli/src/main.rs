//! Airline profit prediction console
//!
//! Loads the pre-trained artifacts once at startup, reports their status,
//! then runs an interactive form over the 12 business metrics. A `predict`
//! command feeds the current vector through the preprocessing pipeline and
//! every available regressor.

mod form;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use form::{Command, CommandError, Form};
use profit_lib::PredictionEngine;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Airline Profit Predictor console
#[derive(Parser)]
#[command(name = "profit")]
#[command(author, version, about = "Interactive airline profit prediction", long_about = None)]
struct Cli {
    /// Directory containing the trained artifacts
    #[arg(long, env = "PROFIT_ARTIFACT_DIR", default_value = ".")]
    artifact_dir: PathBuf,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    println!("{}", "Airline Profit Predictor".bold());

    // Artifacts load exactly once; everything after this works with
    // whatever subset came up.
    let engine = PredictionEngine::load(&cli.artifact_dir);
    output::render_statuses(&engine.artifact_reports(), cli.format);
    output::print_info("Ready to predict. Type 'help' for commands.");

    run_loop(&engine, cli.format)
}

fn run_loop(engine: &PredictionEngine, format: output::OutputFormat) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut form = Form::default();
    let mut line = String::new();

    loop {
        print!("profit> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => output::render_help(),
            Ok(Command::Fields) => output::render_fields(),
            Ok(Command::Show) => output::render_form(&form, format),
            Ok(Command::Reset) => {
                form.reset();
                output::print_success("Form reset to defaults");
            }
            Ok(Command::Set { field, value }) => match form.set(field, &value) {
                Ok(()) => {
                    output::print_success(&format!("{} = {}", field.key(), form.value(field)))
                }
                Err(e) => output::print_warning(&e.to_string()),
            },
            Ok(Command::Predict) => {
                output::render_predictions(&engine.predict(form.metrics()), format)
            }
            Err(CommandError::Empty) => {}
            Err(e) => output::print_warning(&e.to_string()),
        }
    }

    Ok(())
}
