//! hostctl CLI
//!
//! Reconciles a hosted project's database and storage settings with the
//! local `hostctl/config.toml`.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Context;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let ctx = Context::from_cli(&cli);
    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd).await,
        None => {
            println!("{} Hosted project configuration CLI", "hostctl".green().bold());
            println!();
            println!("Run {} for available commands.", "hostctl --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Config { action } => commands::config::run(ctx, action).await,
        Commands::PostgresConfig { action } => commands::postgres::run(ctx, action).await,
        Commands::SslEnforcement { action } => commands::ssl::run(ctx, action).await,
        Commands::NetworkRestrictions { action } => commands::network::run(ctx, action).await,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "hostctl", &mut std::io::stdout());
            Ok(())
        }
    }
}
