//! wsconf CLI
//!
//! Command-line front end for the workspace configuration resolver.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, ProfileAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already installed");
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} workspace configuration", "wsconf".green().bold());
            println!();
            println!("Run {} for available commands.", "wsconf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Config(args) => {
            let inherited = std::env::var("CMAKE_PREFIX_PATH").ok();
            commands::run_config(&args, inherited)
        }
        Commands::Profile { workspace, action } => {
            let hint = match workspace {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            match action {
                ProfileAction::List => commands::run_profile_list(&hint),
                ProfileAction::Set { name } => commands::run_profile_set(&hint, &name),
                ProfileAction::Remove { name } => commands::run_profile_remove(&hint, &name),
            }
        }
    }
}
