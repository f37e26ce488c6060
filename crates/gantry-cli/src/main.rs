mod cli;
mod context;
mod filter;
mod handlers;
mod output;
mod script;
mod store;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("GANTRY_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = CliContext::load(cli.file.as_deref()).await?;
            handlers::run::handle(&mut ctx, args).await?;
        }
        Commands::Check(args) => {
            handlers::check::handle(args).await?;
        }
        Commands::Status => {
            handlers::rig::handle_status(cli.file.as_deref()).await?;
        }
        Commands::Reset => {
            handlers::rig::handle_reset(cli.file.as_deref()).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gantry", &mut std::io::stdout());
        }
    }

    Ok(())
}
