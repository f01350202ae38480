//! namesieve - fuzzy name search over cached per-database indexes
//!
//! Usage:
//!     namesieve add request.json
//!     namesieve find query.json --output response.json
//!     namesieve remove db1
//!     namesieve normalize "Стол 10x5см"

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use namesieve::commands;
use namesieve::{Config, Result};
use namesieve_core::service::{AddDatabaseRequest, FindRequest};
use namesieve_core::Normalizer;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "namesieve")]
#[command(about = "Fuzzy search over short, noisy, mixed-script names")]
#[command(version)]
struct Cli {
    /// Cache directory (overrides NAMESIEVE_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index the records of an AddDatabase request (`-` reads stdin)
    Add { request: PathBuf },

    /// Drop one database's cache
    Remove { database_id: String },

    /// Drop every cached database
    Clear,

    /// Run a FindInDatabase request (`-` reads stdin)
    Find {
        request: PathBuf,

        /// Write the response here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the rewritten text and phonetic key of each argument
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List cached database ids
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    namesieve::tracing::init_with_filter(&cli.log_level);

    let config = Config::from_env().with_cache_dir(cli.cache_dir);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_not_found() => {
            error!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Command::Add { request } => {
            let request: AddDatabaseRequest = commands::read_request(&request)?;
            let mut searcher = commands::open_searcher(config)?;
            let stats = commands::add(&mut searcher, request)?;
            commands::write_json(&stats, None, &mut stdout)?;
        }
        Command::Remove { database_id } => {
            let mut searcher = commands::open_searcher(config)?;
            if !commands::remove(&mut searcher, &database_id)? {
                info!(database_id = %database_id, "nothing to remove");
            }
        }
        Command::Clear => {
            let mut searcher = commands::open_searcher(config)?;
            commands::clear(&mut searcher)?;
        }
        Command::Find { request, output } => {
            let request: FindRequest = commands::read_request(&request)?;
            let searcher = commands::open_searcher(config)?;
            let response = commands::find(&searcher, &request)?;
            commands::write_json(&response, output.as_deref(), &mut stdout)?;
        }
        Command::Normalize { text } => {
            let lines = commands::normalize(&Normalizer::default(), &text);
            commands::write_json(&lines, None, &mut stdout)?;
        }
        Command::List => {
            let searcher = commands::open_searcher(config)?;
            let ids = commands::list(&searcher)?;
            commands::write_json(&ids, None, &mut stdout)?;
        }
    }
    Ok(())
}
