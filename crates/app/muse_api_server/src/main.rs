//! Muse API server binary.
//!
//! Builds the document store handle once, runs migrations and serves the
//! REST API until interrupted.

use std::sync::Arc;

use clap::Parser;
use muse_api::config::ApiConfig;
use muse_core::reply::ScriptedReplyGenerator;
use muse_core::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use tracing::{info, warn};

/// CLI arguments for the API server. Flags override the environment.
#[derive(Parser, Debug)]
#[command(name = "muse_api_server", about = "Muse chat API server", version)]
struct Args {
    /// Address to listen on [env: BIND_ADDR, default: 127.0.0.1:8000].
    #[arg(long)]
    bind: Option<String>,

    /// Document store connection URL [env: DATABASE_URL, default: postgres://localhost:5432].
    #[arg(long)]
    database_url: Option<String>,

    /// Database holding the document collections [env: DATABASE_NAME, default: appdb].
    #[arg(long)]
    database_name: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep documents in process memory instead of PostgreSQL.
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Don't create the documents table at startup.
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,muse_api=debug,muse_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    if let Some(name) = args.database_name {
        config.database_name = name;
    }

    let store: Arc<dyn DocumentStore> = if args.memory {
        warn!("serving from the in-memory store; documents are lost on exit");
        Arc::new(MemoryDocumentStore::new())
    } else {
        info!(
            database_url = %config.database_url,
            database_name = %config.database_name,
            max_connections = args.max_connections,
            "configuring document store"
        );
        let pg = PgDocumentStore::connect_lazy(
            &config.database_url,
            &config.database_name,
            args.max_connections,
        )?;

        if args.skip_migrations {
            info!("skipping database migrations");
        } else {
            info!("running database migrations");
            pg.migrate().await?;
        }
        Arc::new(pg)
    };

    let state = muse_api::AppState::new(store, Arc::new(ScriptedReplyGenerator));
    let app = muse_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, version = muse_core::version(), "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
