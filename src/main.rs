mod cli;
mod config;
mod console;
mod dispatcher;
mod error;
mod kubernetes;
mod llm;
mod manifest;
mod registry;
mod tools;

use clap::Parser;
use tracing::debug;

use cli::Cli;
use config::Config;
use console::Console;
use dispatcher::Dispatcher;
use kubernetes::ClusterHandle;
use llm::OpenAIClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber on stderr
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env(&cli)?;
    debug!(
        model = %config.model,
        timeout = ?config.timeout,
        "Loaded configuration"
    );

    let model = OpenAIClient::new(&config)?;
    let cluster = ClusterHandle::connect(&config).await?;
    cluster.probe().await;

    let dispatcher = Dispatcher::new(&model, &cluster);
    let mut console = Console::stdio();
    console::run(&mut console, &dispatcher).await?;

    Ok(())
}
