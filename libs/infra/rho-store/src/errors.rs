// [libs/infra/rho-store/src/errors.rs]
//! =================================================================
//! APARATO: STORE ERROR CATALOG (V2.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE PERSISTENCIA
//! =================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("CONNECTION_FAULT: failed to open database connection: {0}")]
    ConnectionError(String),

    #[error("QUERY_FAULT: database query failed: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("no user with that username")]
    UserNotFound,

    #[error("username and token do not match")]
    AuthenticationFailed,
}
