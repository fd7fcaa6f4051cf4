//! Expense CLI - track spending in an in-memory session
//!
//! This is the command-line interface for Expense. It drives the core
//! transaction store and acts as its view: every change to the store is
//! reported as it happens.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod output;
mod session;
mod ui;
mod view;

use clap::{CommandFactory, Parser};

use crate::app::{init_logging, AppContext};
use crate::cli::{Cli, Commands, ConfigCommand};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);
    // Logging falls back to `warn` when the config cannot be read.
    let level = ctx
        .config()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    init_logging(cli.verbose, &level)?;
    tracing::debug!(version = expense_core::VERSION, "expense starting");

    match &cli.command {
        Some(Commands::Session(args)) => commands::handle_session(&ctx, args),
        Some(Commands::Config { command }) => match command {
            ConfigCommand::Path => commands::handle_config_path(&ctx),
            ConfigCommand::Init { force } => commands::handle_config_init(&ctx, *force),
        },
        Some(Commands::Completions { shell }) => commands::handle_completions(*shell),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
