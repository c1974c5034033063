//! Rodnya command-line front end
//!
//! Loads the population once, runs a single command and prints the
//! result as JSON on stdout. Logs go to stderr.

mod commands;
mod state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::export::ExportFormat;
use engine::EngineConfig;
use state::AppState;

/// Query and maintain a family tree stored as semicolon CSV
#[derive(Parser, Debug)]
#[command(name = "rodnya")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "RODNYA_CONFIG")]
    config: Option<PathBuf>,

    /// Population CSV, overriding data.csv_path
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List people in id order
    List {
        #[arg(long, default_value = "0")]
        offset: usize,
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Show one person with relatives, photos and zodiac
    Person { id: u64 },
    /// Search names, places and dates
    Search { query: String },
    /// Ancestor tree (or descendants with --descendants)
    Tree {
        id: u64,
        #[arg(long)]
        descendants: bool,
        /// Generations to expand (default: tree.max_depth)
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// How two people are related
    Kinship { first: u64, second: u64 },
    /// Parents, siblings and descendants down to great-grandchildren
    Family { id: u64 },
    /// Population statistics
    Stats,
    /// Referential integrity report
    Validate,
    /// Biography text
    Bio {
        id: u64,
        /// Read the locked biography instead of the open one
        #[arg(long)]
        locked: bool,
    },
    /// Move a child to new parents (0 = unknown)
    SetParents { child: u64, father: u64, mother: u64 },
    /// Link (or with --remove, unlink) two spouses
    Spouse {
        first: u64,
        second: u64,
        #[arg(long)]
        remove: bool,
    },
    /// Delete a person and every reference to them
    Remove { id: u64 },
    /// Export the population
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_found<T: Serialize>(value: Option<T>, what: &str) -> Result<()> {
    match value {
        Some(value) => print_json(&value),
        None => anyhow::bail!("{what} not found"),
    }
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(csv) = &args.csv {
        config.data.csv_path = csv.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_tracing(&config.logging.level);

    info!("Rodnya starting with {}", config.data.csv_path.display());
    let state = AppState::load(config)?;

    use commands::{export, people, queries, relations, statistics};
    match args.command {
        Command::List { offset, limit } => print_json(&people::list_people(&state, offset, limit)),
        Command::Person { id } => print_found(people::get_person(&state, id), "Person"),
        Command::Search { query } => print_json(&queries::search_people(&state, &query)),
        Command::Tree {
            id,
            descendants,
            depth,
        } => print_found(queries::get_tree(&state, id, descendants, depth), "Person"),
        Command::Kinship { first, second } => {
            print_found(queries::get_kinship(&state, first, second), "Person")
        }
        Command::Family { id } => print_json(&queries::get_family_members(&state, id)),
        Command::Stats => print_json(&statistics::get_stats(&state)),
        Command::Validate => print_json(&statistics::get_validation(&state)),
        Command::Bio { id, locked } => print_json(&people::get_bio(&state, id, locked)?),
        Command::SetParents {
            child,
            father,
            mother,
        } => print_json(&relations::set_parents(&state, child, father, mother)?),
        Command::Spouse {
            first,
            second,
            remove,
        } => print_json(&relations::link_spouses(&state, first, second, remove)?),
        Command::Remove { id } => print_json(&relations::remove_person(&state, id)?),
        Command::Export { format, output } => match output {
            Some(path) => print_json(&export::export_to_file(&state, format, &path)?),
            None => {
                print!("{}", export::render(&state, format)?);
                Ok(())
            }
        },
    }
}
