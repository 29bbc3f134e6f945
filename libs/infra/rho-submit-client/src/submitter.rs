// [libs/infra/rho-submit-client/src/submitter.rs]
/*!
 * =================================================================
 * APARATO: BATCH DRAIN PIPELINE (V2.0 - FIRE AND FORGET)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DRENAJE PERIÓDICO Y ENVÍO DE LOTES
 *
 * An unbounded in-process queue fed by the miner, drained once a
 * second by a background task that POSTs the batch and moves on
 * regardless of the outcome.
 * =================================================================
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rho_domain::SubmittedResult;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::client::SubmissionClient;

const DRAIN_INTERVAL: Duration = Duration::from_secs(1);

/// The miner-side handle used to enqueue newly-found distinguished
/// points. Cheap to clone; wraps an unbounded channel sender.
#[derive(Clone)]
pub struct DpSender {
    inner: mpsc::UnboundedSender<SubmittedResult>,
}

impl DpSender {
    pub fn send(&self, result: SubmittedResult) {
        // The receiver only goes away once the submitter task has been
        // told to stop and has exited; a send failing at that point is
        // expected and not actionable.
        let _ = self.inner.send(result);
    }
}

/// Cooperative shutdown flag shared between the mining loop and the
/// submitter task.
#[derive(Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn signal(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn channel() -> (DpSender, mpsc::UnboundedReceiver<SubmittedResult>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DpSender { inner: tx }, rx)
}

/// Runs until `stop` is set, waking every second to drain whatever has
/// accumulated in `receiver` and submitting it as one batch. Transport
/// failures are logged and swallowed — the batch is not retried, its
/// contents are simply gone (duplicates across batches are tolerated
/// elsewhere, never manufactured here).
pub async fn run(
    client: SubmissionClient,
    username: String,
    usertoken: String,
    mut receiver: mpsc::UnboundedReceiver<SubmittedResult>,
    stop: StopFlag,
) {
    loop {
        tokio::time::sleep(DRAIN_INTERVAL).await;

        let mut batch = Vec::new();
        while let Ok(result) = receiver.try_recv() {
            batch.push(result);
        }

        if !batch.is_empty() {
            let batch_size = batch.len();
            match client.submit_batch(&username, &usertoken, batch).await {
                Ok(response) => info!(batch_size, status = %response.status, "🚀 [BATCH_SEALED]: batch submitted"),
                Err(error) => warn!(batch_size, %error, "⚠️ [BATCH_DROPPED]: submission failed, dropping batch"),
            }
        }

        if stop.is_set() {
            break;
        }
    }
}
