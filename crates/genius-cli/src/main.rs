//! CLI binary for chatting with the Genius code generation endpoint.

use std::io::Write as _;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use genius_chat::{
    AttemptOutcome, ChatSession, ClientConfig, HttpTransport, PromptForm, SubmitError, TracingHook,
};

#[derive(Parser)]
#[command(name = "genius", version, about = "Chat with the Genius code generation endpoint")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dashboard base URL (default: $GENIUS_BASE_URL or http://127.0.0.1:3000)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Completion endpoint path (default: $GENIUS_ENDPOINT or /api/code)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds, 0 waits forever (default: $GENIUS_TIMEOUT_SECS or 60)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat; each line is one prompt
    Chat,

    /// Send a single prompt and print the reply
    Ask {
        /// What to generate
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = client_config(&cli)?;
    let transport = HttpTransport::new(&config);
    tracing::debug!(url = transport.url(), "using completion endpoint");

    match cli.command {
        Commands::Chat => cmd_chat(&transport).await?,
        Commands::Ask { prompt } => cmd_ask(&transport, prompt).await?,
    }

    Ok(())
}

fn client_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(ref url) = cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(ref endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

async fn cmd_ask(transport: &HttpTransport, prompt: String) -> anyhow::Result<()> {
    let mut session = ChatSession::new();

    match session
        .submit(transport, &TracingHook, &PromptForm::new(prompt))
        .await
    {
        Ok(AttemptOutcome::Appended { reply }) => {
            println!("{}", reply.content());
            Ok(())
        }
        Ok(AttemptOutcome::Failed(err)) => Err(anyhow!(err)),
        Err(err) => bail!(err),
    }
}

async fn cmd_chat(transport: &HttpTransport) -> anyhow::Result<()> {
    let mut session = ChatSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Genius code chat. /history prints the conversation, /quit exits.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => {
                println!("{}", serde_json::to_string_pretty(session.history())?);
                continue;
            }
            _ => {}
        }

        match session
            .submit(transport, &TracingHook, &PromptForm::new(line))
            .await
        {
            Ok(AttemptOutcome::Appended { reply }) => println!("\n{}\n", reply.content()),
            Ok(AttemptOutcome::Failed(err)) => {
                if err.is_retryable() {
                    eprintln!("error: {err} (send the prompt again to retry)");
                } else {
                    eprintln!("error: {err}");
                }
            }
            Err(SubmitError::Invalid(err)) => eprintln!("{err}"),
            Err(SubmitError::Busy) => eprintln!("still waiting for the previous reply"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment_defaults() {
        let cli = Cli::parse_from([
            "genius",
            "--base-url",
            "http://example.test:9000/",
            "--timeout-secs",
            "0",
            "ask",
            "reverse a string",
        ]);
        let config = client_config(&cli).unwrap();

        assert_eq!(config.url(), "http://example.test:9000/api/code");
        assert_eq!(config.request_timeout, None);
        assert!(matches!(cli.command, Commands::Ask { ref prompt } if prompt == "reverse a string"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
