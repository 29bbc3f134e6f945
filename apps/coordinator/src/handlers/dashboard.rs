// [apps/coordinator/src/handlers/dashboard.rs]
/*!
 * =================================================================
 * APARATO: DASHBOARD SNAPSHOT HANDLER (V2.0)
 * RESPONSABILIDAD: PROYECCIÓN DE CONTADORES CRUDOS
 *
 * `GET /`: a pure function of the store. The HTML dashboard's
 * templating and human-friendly formatting are explicitly out of
 * scope; this returns a minimal placeholder carrying the same raw
 * counts a real dashboard would render.
 * =================================================================
 */

use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::state::AppState;

pub struct DashboardHandler;

impl DashboardHandler {
    pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
        let dp_count = state.dps.count().await.unwrap_or(0);
        let collision_count = state.collisions.count().await.unwrap_or(0);

        Html(format!(
            "<html><body><p>distinguished points: {dp_count}</p><p>collisions: {collision_count}</p></body></html>"
        ))
    }
}
