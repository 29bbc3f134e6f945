// [apps/coordinator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR LIBRARY BARREL (V2.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: ENSAMBLAJE DEL ROUTER AXUM
 *
 * Split out from `main` so integration tests can drive the full
 * axum stack in-process without binding a socket.
 * =================================================================
 */

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::CoordinatorConfig;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::DashboardHandler::handle))
        .route("/health", get(handlers::HealthHandler::handle))
        .route("/submit_work", post(handlers::SubmitWorkHandler::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
