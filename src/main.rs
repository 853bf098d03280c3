use clap::Parser;
use ghfind::commands;
use ghfind::logging::setup_tracing;
use ghfind::{Cli, Commands, FinderConfig};

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = FinderConfig::load()?;
    cli.apply_overrides(&mut config);

    match cli.command {
        None => commands::interactive_session(&config, true).await.map(|_| true),
        Some(Commands::Interactive { no_demo }) => commands::interactive_session(&config, !no_demo)
            .await
            .map(|_| true),
        Some(Commands::Lookup { username, json }) => {
            commands::lookup_command(&config, &username, json).await
        }
        Some(Commands::Config { init }) => commands::config_command(&config, init).map(|_| true),
        Some(Commands::Completions { shell }) => {
            commands::generate_completions(shell);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() {
    setup_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
