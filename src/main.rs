use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use transfer_portal_api::app::{app, AppState};
use transfer_portal_api::config::{AppConfig, Environment};
use transfer_portal_api::database::{DatabaseManager, MemoryStore, PgStore, Store};

#[derive(Parser)]
#[command(name = "transfer-portal-api")]
#[command(about = "Transfer Portal API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Serve from an in-process store instead of PostgreSQL")]
    memory: bool,

    #[arg(long, help = "Listen port (overrides PORTAL_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Apply pending migrations before serving")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transfer_portal_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = transfer_portal_api::config::config().clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting Transfer Portal API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }
    if config.environment != Environment::Development && args.memory {
        tracing::warn!("In-memory store selected outside development; data will not persist");
    }

    let store = build_store(&config, &args).await?;
    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let router = app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Transfer Portal API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server")?;
    Ok(())
}

async fn build_store(config: &AppConfig, args: &Args) -> anyhow::Result<Arc<dyn Store>> {
    if args.memory {
        tracing::info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = DatabaseManager::connect(config).await?;
    if args.migrate {
        DatabaseManager::migrate(&pool).await?;
    }
    Ok(Arc::new(PgStore::new(pool)))
}
