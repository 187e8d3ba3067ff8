//! # rankgate server
//!
//! Binary entry point. Startup order matters: configuration is loaded
//! before anything else, so a missing mandatory setting terminates the
//! process with a non-zero status before a listener is ever bound.

use std::net::SocketAddr;
use std::sync::Arc;

use rankgate_api::{AppState, build_router};
use rankgate_roblox::{RobloxClient, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration — fatal on any missing mandatory value.
    let config = rankgate_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rankgate=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("🚀 Starting rankgate v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("   Managing group {}", config.roblox.group_id);

    let roblox = Arc::new(RobloxClient::new(
        config.roblox.cookie.clone(),
        config.roblox.group_id,
    ));
    let session = Arc::new(Session::new(roblox.clone()));

    let state = AppState {
        roblox,
        session,
        secret_key: config.auth.secret_key.clone(),
        filter_guest_role: config.ranks.filter_guest_role,
    };
    let router = build_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("📡 Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
