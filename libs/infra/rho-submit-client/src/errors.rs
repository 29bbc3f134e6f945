// [libs/infra/rho-submit-client/src/errors.rs]
//! =================================================================
//! APARATO: SUBMISSION CLIENT ERROR CATALOG (V2.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE TRANSPORTE
//! =================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("NETWORK_FAULT: transport error: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("COMMAND_REJECTION: coordinator rejected the batch: {0}")]
    ServerRejection(String),

    #[error("ENVELOPE_CORRUPTION: failed to decode coordinator response: {0}")]
    DecodingFault(#[from] serde_json::Error),
}
