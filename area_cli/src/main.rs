//! # Jagga CLI Application
//!
//! Terminal host for the land-area conversion engine.
//!
//! Usage:
//!   area_cli [options] [unit=value ...]
//!
//! With assignments, computes once and prints the result. Without, starts an
//! interactive prompt that re-renders after every change.
//!
//! Options:
//!   --config <path>    Settings file (TOML)
//!   --json             Print results as JSON
//!   -h, --help         Show this help
//!
//! Environment:
//!   JAGGA_AGGREGATION  all_fields | active_group_only | clear_on_lock
//!   RUST_LOG           Log filter (default: warn)
//!
//! Examples:
//!   area_cli ropani=1 aana=3
//!   area_cli --json bigha=1

mod command;
mod report;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use area_core::settings::{load_settings, AGGREGATION_ENV};
use area_core::{AreaError, AreaResult, EngineSettings, InputEffect, Session};
use tracing_subscriber::EnvFilter;

use command::{parse_assignment, parse_command, Command};
use report::{render_report, render_units};

struct Options {
    config: Option<PathBuf>,
    json: bool,
    assignments: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            print_usage();
            return;
        }
    };

    let settings = match resolve_settings(&options, env::var(AGGREGATION_ENV).ok()) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let result = if options.assignments.is_empty() {
        run_interactive(Session::new(settings), options.json)
    } else {
        run_once(Session::new(settings), &options)
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

/// Returns None when help was requested
fn parse_args(args: &[String]) -> Option<Options> {
    let mut options = Options {
        config: None,
        json: false,
        assignments: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return None,
            "--json" => options.json = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Missing value for --config");
                }
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
            }
            other => options.assignments.push(other.to_string()),
        }
        i += 1;
    }

    Some(options)
}

/// Config file first, then the aggregation override from the environment
fn resolve_settings(options: &Options, aggregation_override: Option<String>) -> AreaResult<EngineSettings> {
    let mut settings = match &options.config {
        Some(path) => load_settings(path)?,
        None => EngineSettings::default(),
    };

    if let Some(name) = aggregation_override {
        settings = settings.with_aggregation_override(&name)?;
    }

    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}

/// Apply every assignment, then print once. Host-side group hiding does not
/// apply here; the session's aggregation policy still does.
fn run_once(mut session: Session, options: &Options) -> AreaResult<()> {
    for note in apply_assignments(&mut session, &options.assignments)? {
        eprintln!("note: {}", note);
    }
    print_snapshot(&session, options.json)
}

/// Returns a note for every assignment the session discarded
fn apply_assignments(session: &mut Session, assignments: &[String]) -> AreaResult<Vec<String>> {
    let mut notes = Vec::new();
    for assignment in assignments {
        if let Command::Set { unit, text } = parse_assignment(assignment)? {
            if let InputEffect::Discarded { locked } = session.set_input(unit, text) {
                notes.push(format!("{} ignored, session is locked to {}", assignment, locked));
            }
        }
    }
    Ok(notes)
}

fn run_interactive(mut session: Session, json: bool) -> AreaResult<()> {
    println!("Jagga - Land Area Converter");
    println!("===========================");
    println!("Type `help` for commands.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return Ok(());
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to read stdin");
                return Ok(());
            }
            None => return Ok(()),
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };

        match command {
            Command::Nothing => {}
            Command::Quit => return Ok(()),
            Command::Help => print_commands(),
            Command::Units => print!("{}", render_units(&session)),
            Command::Show => print_snapshot(&session, json)?,
            Command::Json => print_snapshot(&session, true)?,
            Command::Reset => {
                session.reset();
                print_snapshot(&session, json)?;
            }
            Command::Set { unit, text } => {
                let group = unit.group();
                if !session.group_visible(group) {
                    tracing::warn!(unit = %unit, group = %group, "input to hidden group refused");
                    println!("{} is hidden while the session is locked; `reset` to switch systems.", group);
                    continue;
                }
                match session.set_input(unit, text) {
                    InputEffect::Recorded => {}
                    InputEffect::Locked(locked) => println!("Locked to {}.", locked),
                    InputEffect::Discarded { locked } => {
                        println!("{} ignored, session is locked to {}.", unit, locked);
                        continue;
                    }
                }
                print_snapshot(&session, json)?;
            }
        }
    }
}

fn print_snapshot(session: &Session, json: bool) -> AreaResult<()> {
    let snapshot = session.compute();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_report(session, &snapshot));
    }
    Ok(())
}

fn print_error(e: &AreaError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
}

fn exit_with(e: &AreaError) -> ! {
    print_error(e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    std::process::exit(1);
}

fn print_commands() {
    println!("Commands:");
    println!("  <unit> <value>   Set a field (e.g. `ropani 2`, `aana=3`)");
    println!("  <unit>           Clear a field");
    println!("  show             Show results");
    println!("  json             Show results as JSON");
    println!("  units            List units and factors");
    println!("  reset            Clear all fields and the active group");
    println!("  quit             Exit");
}

fn print_usage() {
    println!("Usage: area_cli [--config <path>] [--json] [unit=value ...]");
    println!();
    println!("Units: ropani aana paisa daam bigha kattha dhur sq_feet sq_meter");
    println!();
    println!("Environment:");
    println!("  {}  all_fields | active_group_only | clear_on_lock", AGGREGATION_ENV);
    println!("  RUST_LOG           Log filter (default: warn)");
}
