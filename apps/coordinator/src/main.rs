// [apps/coordinator/src/main.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR MAIN ENTRY POINT (V2.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * Brings up tracing, parses configuration, opens the store, then
 * binds and serves — in that order, so a misconfigured instance
 * never reaches the point of accepting a connection.
 * =================================================================
 */

use anyhow::Context;
use clap::Parser;
use rho_coordinator::{build_router, AppState, CoordinatorConfig};
use rho_hash::HashInstance;
use rho_store::StoreClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    rho_telemetry::init_tracing("coordinator");

    let config = CoordinatorConfig::parse();
    let instance = HashInstance::new(config.hash_prefix_bytes, config.hash_suffix_bytes)
        .context("invalid hash instance: prefix_bytes + suffix_bytes must be in 1..=27")?;
    info!(?instance, "🛰️ [INSTANCE_PINNED]: collision-search instance (not enforced server-side, logged for operator audit)");

    let store = StoreClient::connect(&config.database_url, config.turso_auth_token.clone())
        .await
        .context("failed to connect to the store")?;

    let state = AppState::new(store, instance);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!(port = config.port, "🚀 [IGNITION]: coordinator listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
