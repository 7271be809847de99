mod cli;
mod commands;
mod config;
mod output;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, OutputFormat};
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub format: OutputFormat,
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

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        format: cli.format,
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&ctx, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Apply(args) => commands::apply::run(ctx, args),
        Command::Plan(args) => commands::plan::run(ctx, args),
        Command::Show(args) => commands::show::run(ctx, args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "cpctl", &mut io::stdout());
            Ok(())
        }
    }
}

/// Print an error with its cause chain and, for Grafana errors, a hint
fn report(ctx: &Context, err: &anyhow::Error) {
    ui::error(&format!("{err:#}"));

    if let Some(grafana_err) = err.downcast_ref::<grafana::Error>() {
        let category = grafana_err.category();
        if ctx.verbose > 0 {
            ui::hint(&format!("category: {}", category.description()));
        }
        ui::hint(category.advice());
    }
}
