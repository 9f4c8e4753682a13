mod catalog;
mod cli;
mod commands;
mod config;
mod paths;
mod resource;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use commands::RunFailed;
use config::Settings;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub settings: Settings,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    // Golden output lines must stay byte-exact when piped
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<RunFailed>() => {
            log::debug!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "rigging", &mut io::stdout());
        return Ok(());
    }

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings: Settings::load()?,
    };
    log::trace!("verbosity {}", ctx.verbose);

    match cli.command {
        Command::Resource(args) => commands::resource::run(&ctx, args),
        Command::Device(args) => commands::device::run(&ctx, args),
        Command::Facts(args) => commands::facts::run(&ctx, args),
        Command::Types(args) => commands::types::run(&ctx, args),
        Command::Completions { .. } => Ok(()),
    }
}
