use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use toolcall::{
    Cli, Config, Conversation, GeminiClient, PriceClient,
    tools::{GET_CRYPTO, default_tools},
};
use tracing::error;
use tracing_subscriber::EnvFilter;

async fn run(config: Config) -> toolcall::Result<()> {
    let chat = GeminiClient::from_config(&config);
    let tools = default_tools(PriceClient::from_config(&config))
        .map_err(|err| toolcall::Error::from_tool(GET_CRYPTO, err))?;

    let mut conversation = Conversation::new(chat, Arc::new(tools), config.prompt);
    let choice = conversation.run().await?;

    println!("Response after tool call:");
    println!("{}", serde_json::to_string_pretty(&choice)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match Config::from_cli(Cli::parse()) {
        Ok(config) => run(config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = ?err.kind(), "{err}");
            ExitCode::FAILURE
        }
    }
}
