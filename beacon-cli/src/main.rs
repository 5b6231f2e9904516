use anyhow::{Context, Result};
use beacon::model::ApiMessage;
use beacon::server::{DEFAULT_PING_INTERVAL, DEFAULT_PORT, RelayConfig, run};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "beacon")]
#[command(bin_name = "beacon")]
#[command(about = "Lobby-based WebRTC signaling relay", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay.
    Serve {
        #[arg(long, env = "BEACON_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        #[arg(
            long,
            env = "BEACON_PING_INTERVAL_SECS",
            default_value_t = DEFAULT_PING_INTERVAL.as_secs(),
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        ping_interval_secs: u64,
    },

    /// Check that a relay is up.
    Status {
        #[arg(long, env = "BEACON_URL", default_value = DEFAULT_URL)]
        url: String,
    },

    /// List open lobbies with their client counts.
    Lobbies {
        #[arg(long, env = "BEACON_URL", default_value = DEFAULT_URL)]
        url: String,
    },

    /// Drop every lobby on a running relay.
    Reset {
        #[arg(long, env = "BEACON_URL", default_value = DEFAULT_URL)]
        url: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            ping_interval_secs,
        } => {
            let config = RelayConfig::new(host, port)
                .with_ping_interval(Duration::from_secs(ping_interval_secs));
            serve(config).await
        }
        Commands::Status { url } => status(&url).await,
        Commands::Lobbies { url } => lobbies(&url).await,
        Commands::Reset { url, yes } => reset(&url, yes).await,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beacon=info,beacon_server=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

async fn serve(config: RelayConfig) -> Result<()> {
    init_tracing();

    println!(
        "{}",
        format!("📡 Starting beacon relay on {}", config.bind_addr)
            .green()
            .bold()
    );
    println!("   ⏱  Liveness probe every {:?}", config.ping_interval);

    let bind_addr = config.bind_addr;
    run(config, shutdown_signal())
        .await
        .with_context(|| format!("Relay on {} failed", bind_addr))?;

    println!("{}", "👋 Relay stopped".cyan());
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn endpoint(url: &str, path: &str) -> String {
    format!("{}{}", url.trim_end_matches('/'), path)
}

async fn status(url: &str) -> Result<()> {
    let body: ApiMessage = reqwest::get(endpoint(url, "/api/status"))
        .await
        .with_context(|| format!("Relay at {} is unreachable", url))?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected status response")?;

    println!("{} {}", "✔".green().bold(), body.message);
    Ok(())
}

async fn lobbies(url: &str) -> Result<()> {
    let lobbies: BTreeMap<String, usize> = reqwest::get(endpoint(url, "/api/lobbies"))
        .await
        .with_context(|| format!("Relay at {} is unreachable", url))?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected lobbies response")?;

    if lobbies.is_empty() {
        println!("{}", "No open lobbies".yellow());
        return Ok(());
    }

    println!("{}", format!("{} open lobby(ies)", lobbies.len()).cyan().bold());
    for (code, clients) in &lobbies {
        println!("   {:<16} {} client(s)", code.bold(), clients);
    }
    Ok(())
}

async fn reset(url: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Drop every lobby on {}?", url))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let body: ApiMessage = reqwest::Client::new()
        .post(endpoint(url, "/api/reset"))
        .send()
        .await
        .with_context(|| format!("Relay at {} is unreachable", url))?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected reset response")?;

    println!("{} {}", "✔".green().bold(), body.message);
    Ok(())
}
