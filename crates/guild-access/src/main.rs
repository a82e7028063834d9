//! Guild Access - Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use guild_access::{AppServer, Config, DiscordClient, InMemoryMembershipStore};

#[derive(Parser, Debug)]
#[command(name = "guild-access")]
#[command(about = "Site user authorization for Discord guild dashboards")]
#[command(version)]
struct Cli {
    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Discord API base URL (for proxies and mock servers)
    #[arg(long, env = "DISCORD_API_URL")]
    discord_api_url: Option<String>,

    /// JSON file with registered guilds, roles and claims
    #[arg(long, env = "MEMBERSHIP_SEED_PATH")]
    membership_seed: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting guild access server");

    let mut config = Config::new(cli.membership_seed);
    if let Some(url) = cli.discord_api_url.as_deref() {
        config = config.with_discord_api_url(url)?;
    }

    let provider = DiscordClient::new(&config)?;
    let store = match config.membership_seed.as_deref() {
        Some(path) => InMemoryMembershipStore::from_seed_file(path).await?,
        None => {
            tracing::warn!("No membership seed configured, starting with an empty store");
            InMemoryMembershipStore::new()
        }
    };

    tracing::info!(
        discord_api_url = %provider.base_url(),
        registered_guilds = store.guild_count().await,
        port = cli.port,
        "Running in HTTP mode"
    );

    AppServer::new(Arc::new(provider), Arc::new(store)).run_http(cli.port).await
}
