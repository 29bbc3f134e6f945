// [libs/domain/rho-domain/src/wire.rs]
/*!
 * =================================================================
 * APARATO: SUBMIT WORK WIRE CONTRACT (V2.0 - STRICT ENVELOPE)
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: ENVOLTURAS DE PETICIÓN Y RESPUESTA
 *
 * A declared schema, parsed then validated centrally, rather than
 * ad-hoc dynamic field access on a JSON blob.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// One worker-reported chain: the seed and the distinguished endpoint
/// it walked to, both hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedResult {
    pub start: String,
    pub dp: String,
}

/// The `POST /submit_work` request body. Unknown fields are rejected
/// rather than silently ignored — a typo'd or stale client field
/// should surface as a 400, not vanish into a `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitWorkRequest {
    pub username: String,
    pub usertoken: String,
    pub results: Vec<SubmittedResult>,
}

/// The `POST /submit_work` response body. All variants share the same
/// `status` field so clients can deserialize once and branch on text,
/// matching the reference wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitWorkResponse {
    pub status: String,
}

impl SubmitWorkResponse {
    pub fn accepted(count: usize, elapsed_ms: u128) -> Self {
        Self {
            status: format!("accepted {count} results in {elapsed_ms}ms"),
        }
    }

    pub fn bad_request() -> Self {
        Self {
            status: "bad request".to_string(),
        }
    }

    pub fn bad_hash_length() -> Self {
        Self {
            status: "bad hash length".to_string(),
        }
    }

    pub fn bad_credentials() -> Self {
        Self {
            status: "bad username and/or usertoken".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_message_matches_the_wire_format() {
        let response = SubmitWorkResponse::accepted(3, 12);
        assert_eq!(response.status, "accepted 3 results in 12ms");
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = SubmitWorkRequest {
            username: "alice".to_string(),
            usertoken: "alicetoken".to_string(),
            results: vec![SubmittedResult {
                start: "deadbeefcafebabe".to_string(),
                dp: "1111111111111111".to_string(),
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: SubmitWorkRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
