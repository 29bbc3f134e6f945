// [apps/coordinator/src/handlers/submit.rs]
/*!
 * =================================================================
 * APARATO: SUBMIT WORK HANDLER (V3.0 - STRICT ENVELOPE)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: AUTENTICACIÓN, VALIDACIÓN, INSERT-OR-COLLIDE
 * =================================================================
 */

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use rho_domain::{SubmitWorkRequest, SubmitWorkResponse};
use tracing::instrument;

use crate::error::CoordinatorError;
use crate::state::AppState;

pub struct SubmitWorkHandler;

impl SubmitWorkHandler {
    // `payload` is extracted as `Result<Json<_>, JsonRejection>` rather
    // than the bare `Json<SubmitWorkRequest>` extractor: the latter
    // rejects a malformed envelope (bad JSON syntax, missing/mistyped
    // field, or — with `deny_unknown_fields` — an unrecognised one)
    // with axum's own plain-text rejection body *before* this fn ever
    // runs, bypassing `CoordinatorError` and the wire contract's
    // `400 {"status": "bad request"}` entirely.
    #[instrument(skip(state, payload))]
    pub async fn handle(
        State(state): State<AppState>,
        payload: Result<Json<SubmitWorkRequest>, JsonRejection>,
    ) -> Result<impl IntoResponse, CoordinatorError> {
        let started = Instant::now();

        let Json(payload) = payload.map_err(|rejection| {
            tracing::warn!(%rejection, "⚠️ [ENVELOPE_REJECTED]: malformed submit_work envelope");
            CoordinatorError::BadRequest
        })?;

        // Step 1: authenticate by username, then a constant-time token
        // compare (see `UserRepository::authenticate`).
        let user = state
            .users
            .authenticate(&payload.username, &payload.usertoken)
            .await
            .map_err(|_| CoordinatorError::BadCredentials)?;

        // Step 2: decode and length-check every result before touching
        // the store. The first failure aborts the whole batch.
        let expected_len = state.instance.total_bytes();
        let mut decoded = Vec::with_capacity(payload.results.len());
        for result in &payload.results {
            let start = hex::decode(&result.start).map_err(|_| CoordinatorError::BadRequest)?;
            let end = hex::decode(&result.dp).map_err(|_| CoordinatorError::BadRequest)?;
            if start.len() != expected_len || end.len() != expected_len {
                return Err(CoordinatorError::BadHashLength);
            }
            decoded.push((start, end));
        }

        // Steps 3-5: bulk-insert / insert-or-collide, bump the user's
        // counter, commit — all inside one serialized transaction.
        let now = chrono::Utc::now().timestamp();
        let outcome = state.ingest.ingest(user.userid, &decoded, now).await?;

        let elapsed_ms = started.elapsed().as_millis();
        Ok(Json(SubmitWorkResponse::accepted(outcome.accepted, elapsed_ms)))
    }
}
