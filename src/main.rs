//! PruneNetCfg - list and remove installed network components

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use prunenetcfg::commands;
use prunenetcfg::selection::{accept_all, PromptCollector};
use prunenetcfg::service::PlatformRuntime;
use prunenetcfg::{Cli, Mode, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;

    // One runtime for the whole process, however many sessions are opened
    let runtime = PlatformRuntime::init()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match settings.mode {
        Mode::List => commands::list::run(&runtime, &settings, &mut out),
        Mode::Prune if settings.assume_yes => {
            commands::prune::run(&runtime, &settings, &mut out, &mut accept_all())
        }
        Mode::Prune => {
            let mut prompt = PromptCollector::new(io::stdin().lock(), io::stdout());
            commands::prune::run(&runtime, &settings, &mut out, &mut prompt)
        }
    }
}
