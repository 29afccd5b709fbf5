//! typetalk terminal client entry point.
//!
//! Binary name: `typetalk`
//!
//! Parses CLI arguments, sets up tracing, loads the client configuration,
//! then dispatches to the interactive chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,typetalk=debug",
        _ => "trace",
    };
    typetalk_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(&cli).await;

    // Flush exporters before any exit path, including errors.
    typetalk_observe::tracing_setup::shutdown_tracing();

    if !result? {
        std::process::exit(1);
    }
    Ok(())
}

/// Dispatch the parsed command. `Ok(false)` means the exchange failed and
/// the process should exit non-zero.
async fn run(cli: &Cli) -> anyhow::Result<bool> {
    let command = cli.command.clone().unwrap_or(Commands::Chat);

    // Neither of these needs configuration
    match &command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "typetalk", &mut std::io::stdout());
            return Ok(true);
        }
        Commands::Types => {
            cli::types::list_types(cli.json)?;
            return Ok(true);
        }
        _ => {}
    }

    let state = AppState::init(cli.endpoint.clone()).await?;

    match command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await.map(|()| true),
        Commands::Ask { text } => cli::ask::ask(&state, &text.join(" "), cli.json).await,
        Commands::Types | Commands::Completions { .. } => unreachable!("handled above"),
    }
}
