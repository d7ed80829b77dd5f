//! Occupancy timeline HTTP server.
//!
//! # Usage
//!
//! ```bash
//! RENTALS_PATH=data/rentals.json cargo run --bin occupancy-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (overrides `[server] host`, default 0.0.0.0)
//! - `PORT`: Server port (overrides `[server] port`, default 8080)
//! - `RENTALS_PATH`: JSON file seeding the in-memory repository
//!   (overrides `[data] rentals_path`)
//! - `TIMELINE_CONFIG`: Path to a `timeline.toml`; otherwise the default
//!   locations are searched and built-in defaults used when none exists
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use occupancy_rust::config::TimelineConfig;
use occupancy_rust::db::repositories::LocalRepository;
use occupancy_rust::db::repository::RentalRepository;
use occupancy_rust::http::{create_router, AppState};
use occupancy_rust::io::load_rentals_from_json_file;

fn load_config() -> anyhow::Result<TimelineConfig> {
    if let Ok(path) = env::var("TIMELINE_CONFIG") {
        return TimelineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path));
    }
    match TimelineConfig::from_default_location() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("{}; using built-in defaults", e);
            Ok(TimelineConfig::default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting occupancy timeline server");

    let config = load_config()?;

    let repository = LocalRepository::new();
    let rentals_path = env::var("RENTALS_PATH")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.data.rentals_path.clone());
    if let Some(path) = rentals_path {
        let rentals = load_rentals_from_json_file(&path)
            .with_context(|| format!("Failed to seed rentals from {}", path.display()))?;
        let stored = repository.store_rentals(rentals).await?;
        info!("Seeded repository with {} rentals", stored);
    }

    let state = AppState::new(Arc::new(repository)).with_defaults(config.timeline.clone());
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
