// [libs/infra/rho-submit-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN SUBMISSION UPLINK (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: NEGOCIACIÓN HTTP CON EL COORDINADOR
 *
 * The worker's uplink to the coordinator: a thin `reqwest` wrapper
 * around `POST /submit_work`.
 * =================================================================
 */

use reqwest::{Client, StatusCode};
use rho_domain::{SubmitWorkRequest, SubmitWorkResponse, SubmittedResult};
use tracing::instrument;

use crate::errors::ClientError;

pub struct SubmissionClient {
    http: Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::builder()
                .user_agent("rho-miner/0.1")
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self, username, usertoken, results), fields(batch_size = results.len()))]
    pub async fn submit_batch(
        &self,
        username: &str,
        usertoken: &str,
        results: Vec<SubmittedResult>,
    ) -> Result<SubmitWorkResponse, ClientError> {
        let request = SubmitWorkRequest {
            username: username.to_string(),
            usertoken: usertoken.to_string(),
            results,
        };

        let url = format!("{}/submit_work", self.base_url);
        let response = self.http.post(&url).json(&request).send().await?;

        if response.status() == StatusCode::OK {
            let body: SubmitWorkResponse = response.json().await?;
            Ok(body)
        } else {
            tracing::warn!(status = %response.status(), "⚠️ [COMMAND_REJECTION]: coordinator refused batch");
            Err(ClientError::ServerRejection(format!(
                "HTTP {}",
                response.status()
            )))
        }
    }
}
