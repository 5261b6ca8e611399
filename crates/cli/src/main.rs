//! Job Tracker CLI - list, add, edit, delete, save and load jobs
//!
//! Every invocation loads the working file, performs one command and,
//! when the command changed the register, writes the working file back.

mod logging;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use jobtracker_core::application::{CommandOutcome, JobCommand, JobService};
use jobtracker_core::domain::{JobId, JobUpdate, NewJob};
use jobtracker_core::AppError;
use jobtracker_infra_file::{is_jobs_file, with_jobs_extension, JobsFileStore};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_JOBS_FILE: &str = "~/.jobtracker/jobs.jobs";
const DELETE_PROMPT: &str = "Are you sure you want to delete?";

#[derive(Parser)]
#[command(name = "jobs")]
#[command(about = "Track freelance and trade jobs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Working jobs file (loaded at start, saved after every change)
    #[arg(long, env = "JOBS_FILE", default_value = DEFAULT_JOBS_FILE)]
    file: String,

    /// Log output format (json or text)
    #[arg(long, env = "JOBS_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all jobs
    List,

    /// Show a single job
    Show {
        /// Job ID
        id: JobId,
    },

    /// Add a new job
    Add {
        /// Client name
        #[arg(short, long)]
        name: String,

        /// Description of the work
        #[arg(short, long)]
        details: String,

        /// Price (non-negative)
        #[arg(short, long, value_parser = parse_price)]
        price: f64,

        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        /// Mark the job as completed
        #[arg(long)]
        completed: bool,

        /// Mark the job as paid
        #[arg(long)]
        paid: bool,
    },

    /// Edit an existing job (only the given fields change)
    Edit {
        /// Job ID
        id: JobId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        details: Option<String>,

        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        completed: Option<bool>,

        #[arg(long)]
        paid: Option<bool>,
    },

    /// Delete a job
    Delete {
        /// Job ID
        id: JobId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Save all jobs to a file
    Save {
        /// Destination (".jobs" is appended when there is no extension)
        path: PathBuf,
    },

    /// Replace all jobs with the contents of a file
    Load {
        /// Source (".jobs" is appended when there is no extension)
        path: PathBuf,
    },
}

fn parse_price(s: &str) -> std::result::Result<f64, String> {
    let price: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price must be a non-negative amount, got {}", s));
    }
    Ok(price)
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", s, e))
}

/// Load the working file into a fresh service; a missing file is an empty register
fn open_service(working: &Path) -> Result<JobService> {
    let mut service = JobService::new(Arc::new(JobsFileStore::new()));
    if working.exists() {
        let count = service
            .load(working)
            .with_context(|| format!("Failed to load working file {}", working.display()))?;
        debug!(path = %working.display(), count, "Working file loaded");
    } else {
        info!(path = %working.display(), "Working file not found, starting empty");
    }
    Ok(service)
}

fn persist(service: &JobService, working: &Path) -> Result<()> {
    if let Some(parent) = working.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    service
        .save(working)
        .with_context(|| format!("Failed to save working file {}", working.display()))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_table(service: &JobService) {
    println!("{}", render::TITLE.cyan().bold());
    println!("{}", render::render_table(service.list()));
}

fn run(cli: Cli) -> Result<()> {
    let working = with_jobs_extension(shellexpand::tilde(&cli.file).into_owned());
    let mut service = open_service(&working)?;

    let command = match cli.command {
        Commands::List => {
            print_table(&service);
            return Ok(());
        }
        Commands::Show { id } => {
            let job = service.get(id)?.clone();
            println!("{}", render::render_table(std::slice::from_ref(&job)));
            return Ok(());
        }
        Commands::Add {
            name,
            details,
            price,
            date,
            completed,
            paid,
        } => JobCommand::Add(NewJob {
            name,
            details,
            price,
            date,
            completed,
            paid,
        }),
        Commands::Edit {
            id,
            name,
            details,
            price,
            date,
            completed,
            paid,
        } => JobCommand::Edit {
            id,
            update: JobUpdate {
                name,
                details,
                price,
                date,
                completed,
                paid,
            },
        },
        Commands::Delete { id, yes } => {
            service.get(id)?;
            if !yes && !confirm(DELETE_PROMPT)? {
                println!("{}", "Deletion cancelled".yellow());
                return Ok(());
            }
            JobCommand::Delete { id }
        }
        Commands::Save { path } => JobCommand::Save {
            path: with_jobs_extension(path),
        },
        Commands::Load { path } => {
            let path = with_jobs_extension(path);
            if !is_jobs_file(&path) {
                tracing::warn!(path = %path.display(), "Loading a file without the .jobs extension");
            }
            JobCommand::Load { path }
        }
    };

    let outcome = service.dispatch(command)?;
    match &outcome {
        CommandOutcome::Added(id) => println!("{}", format!("✓ Job {} added", id).green().bold()),
        CommandOutcome::Edited(id) => {
            println!("{}", format!("✓ Job {} updated", id).green().bold())
        }
        CommandOutcome::Deleted(id) => {
            println!("{}", format!("✓ Job {} deleted", id).green().bold())
        }
        CommandOutcome::Saved { count } => {
            println!("{}", format!("✓ Saved {} jobs", count).green().bold())
        }
        CommandOutcome::Loaded { count } => {
            println!("{}", format!("✓ Loaded {} jobs", count).green().bold())
        }
    }

    if outcome.mutates() {
        persist(&service, &working)?;
        println!();
        print_table(&service);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<AppError>()
                .map(|app| app.kind().to_string())
                .unwrap_or_else(|| "ERROR".to_string());
            eprintln!("{} {:#}", format!("✗ [{}]", kind).red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
