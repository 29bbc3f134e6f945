// [apps/coordinator/src/error.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR ERROR CATALOG (V2.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: MAPEO DE FALLOS A RESPUESTA HTTP
 *
 * Maps the ingest contract's error kinds to their HTTP status and
 * body exactly once, so handlers never re-derive the mapping.
 * =================================================================
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rho_domain::SubmitWorkResponse;
use rho_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("malformed request envelope")]
    BadRequest,

    #[error("hash length mismatch")]
    BadHashLength,

    #[error("bad username and/or usertoken")]
    BadCredentials,

    #[error("internal store error: {0}")]
    Internal(#[from] StoreError),
}

impl From<&CoordinatorError> for (StatusCode, SubmitWorkResponse) {
    fn from(error: &CoordinatorError) -> Self {
        match error {
            CoordinatorError::BadRequest => (StatusCode::BAD_REQUEST, SubmitWorkResponse::bad_request()),
            CoordinatorError::BadHashLength => {
                (StatusCode::BAD_REQUEST, SubmitWorkResponse::bad_hash_length())
            }
            CoordinatorError::BadCredentials => {
                (StatusCode::UNAUTHORIZED, SubmitWorkResponse::bad_credentials())
            }
            CoordinatorError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmitWorkResponse {
                    status: "internal error".to_string(),
                },
            ),
        }
    }
}

impl IntoResponse for CoordinatorError {
    fn into_response(self) -> Response {
        if let CoordinatorError::Internal(ref source) = self {
            tracing::error!(error = %source, "❌ [INGEST_FAULT]: ingest failed with a store error");
        }
        let (status, body): (StatusCode, SubmitWorkResponse) = (&self).into();
        (status, Json(body)).into_response()
    }
}
