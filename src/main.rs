use anyhow::Result;
use clap::{CommandFactory, Parser};

use tree_explorer::cli::{Cli, Command};
use tree_explorer::commands;
use tree_explorer::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Completions need no configuration
    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Browse(args) => {
            tracing::info!(?args, "Starting explorer");
            commands::browse::run(args, &config)?;
        }
        Command::Print(args) => {
            tracing::info!(?args, "Printing tree");
            commands::print::run(args, &config)?;
        }
        Command::Classify(args) => {
            commands::classify::run(args, &config, cli.verbose > 0)?;
        }
        Command::Completions(_) => {}
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tree_explorer={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
