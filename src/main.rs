use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tasklex::cli::args::{Cli, Commands};
use tasklex::cli::commands;
use tasklex::config::Config;
use tasklex::features::nlp::DateContext;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKLEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(lang) = cli.lang {
        config.general.lang = Some(lang);
    }
    let format = cli.output.unwrap_or(config.general.default_output);
    let now = Local::now().naive_local();
    tracing::debug!(%now, lang = %config.resolved_lang(), "starting");

    let output = match cli.command {
        Commands::Parse { input } => {
            commands::parse(&input.join(" "), &config.input_context(), now, format)?
        },
        Commands::DueMenu { fragment, through } => {
            commands::due_menu(fragment.as_deref().unwrap_or_default(), &through, now, format)?
        },
        Commands::RescheduleMenu { fragment, task } => {
            let dates = DateContext::new(now, config.resolved_lang());
            commands::reschedule_menu(fragment.as_deref().unwrap_or_default(), &task, &dates, format)?
        },
        Commands::Resolve { fragment } => {
            let dates = DateContext::new(now, config.resolved_lang());
            commands::resolve(&fragment, &dates, format)?
        },
        Commands::RescheduleDate { arg } => commands::reschedule_date(&arg, now, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
