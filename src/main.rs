use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use research_agent::agent::ResearchAgent;
use research_agent::client::ResearchApiClient;
use research_agent::config::Config;
use research_agent::{api, cli, logging};

#[derive(Parser)]
#[command(name = "research-agent", version, about = "Web search and summarization agent")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive research prompt (default)
    Chat,
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Query a running API and print the summarized results
    Ask {
        query: String,
        #[arg(long, default_value = "http://localhost:8000")]
        url: String,
        /// Only print the top result
        #[arg(long)]
        top: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(Path::new("logs"))?;

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let agent = build_agent()?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let interrupted = async {
                tokio::signal::ctrl_c().await.ok();
            };
            let outcome = cli::run(&agent, stdin, &mut stdout, interrupted).await;
            stdout.flush()?;
            // tokio's stdin read runs on a blocking thread that cannot be
            // cancelled; dropping the runtime would wait on it until Enter.
            std::process::exit(match outcome {
                Ok(()) => 0,
                Err(e) => {
                    tracing::error!("interactive session failed: {e:#}");
                    1
                }
            });
        }
        Command::Serve { host, port } => {
            let agent = Arc::new(build_agent()?);
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            api::serve(agent, addr).await?;
        }
        Command::Ask { query, url, top } => ask(&url, &query, top).await?,
    }
    Ok(())
}

fn build_agent() -> anyhow::Result<ResearchAgent> {
    let config = Config::from_env()?;
    tracing::info!("configuration validated successfully");
    Ok(ResearchAgent::from_config(&config))
}

async fn ask(url: &str, query: &str, top: bool) -> anyhow::Result<()> {
    let client = ResearchApiClient::new(url);
    if !client.health_check().await {
        anyhow::bail!("Research Agent API is not available at {}", client.base_url());
    }

    let results: Vec<_> = if top {
        client.top_result(query).await.into_iter().collect()
    } else {
        client.all_results(query).await
    };

    if results.is_empty() {
        println!("No results found");
        return Ok(());
    }

    println!("Found {} results:\n", results.len());
    for result in results {
        println!("#{}: {}", result.rank, result.title);
        println!("   URL: {}", result.url);
        println!("   Summary: {}", result.summary);
        println!();
    }
    Ok(())
}
