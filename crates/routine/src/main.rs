//! Binary entry point: config, store, seed, serve.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::StaticTokenProvider;
use crate::config::ServerConfig;
use crate::db::RoutineDbManager;
use crate::types::AppState;

mod auth;
mod config;
mod db;
mod schedule;
mod server;
mod types;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config_path =
        std::env::args().nth(1).unwrap_or_else(|| "config/routine.json".to_string());
    let config = if Path::new(&config_path).exists() {
        ServerConfig::load_from_file(Path::new(&config_path))
            .map_err(|e| anyhow::anyhow!("Failed to load config from {config_path}: {e}"))?
    } else {
        warn!("No config file at {config_path}, using defaults");
        ServerConfig::default()
    };

    if StaticTokenProvider::from_config(&config.api_tokens).is_empty() {
        warn!("No API tokens configured; all write requests will be rejected");
    }

    info!("Opening schedule store at {}", config.db_path);
    let db = RoutineDbManager::new(&config.db_path);

    let (classes, exams) = db.seed_if_empty().context("Failed to seed schedule store")?;
    if classes > 0 || exams > 0 {
        info!("Seeded store with {} classes and {} exams", classes, exams);
    }
    info!(
        "Store holds {} classes, {} exams",
        db.count_classes()?,
        db.count_exams()?
    );

    let addr = format!("{}:{}", config.address, config.port);
    let state = Arc::new(AppState::new(&config, db));
    let router = server::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    info!("Shutting down...");
}
