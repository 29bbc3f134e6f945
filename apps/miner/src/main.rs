// [apps/miner/src/main.rs]
/*!
 * =================================================================
 * APARATO: MINER MAIN ENTRY POINT (V2.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: IGNICIÓN DEL WALKER GPU Y BUCLE DE MINADO
 *
 * Brings up the submission pipeline, initialises the GPU device,
 * then drives the advance/submit loop until a Ctrl-C signal flips
 * the shared stop flag.
 * =================================================================
 */

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rho_domain::SubmittedResult;
use rho_hash::HashInstance;
use rho_miner::gpu::{
    DEFAULT_MAX_DPS_PER_CALL, DEFAULT_NUM_WALKERS, DEFAULT_STEPS_PER_TASK, DEFAULT_WORKGROUP_SIZE,
};
use rho_miner::{GpuMiner, MinerConfig};
use rho_submit_client::{channel, run, StopFlag, SubmissionClient};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    rho_telemetry::init_tracing("miner");

    let config = MinerConfig::parse();
    let instance = HashInstance::new(config.hash_prefix_bytes, config.hash_suffix_bytes)
        .context("invalid hash instance: prefix_bytes + suffix_bytes must be in 1..=27")?;

    info!(
        ?instance,
        dp_bits = config.dp_bits,
        dry_run = config.dry_run,
        "collision-search instance"
    );

    let stop = StopFlag::new();
    let signal_flag = stop.clone();
    ctrlc::set_handler(move || {
        warn!("⚠️ [SHUTDOWN_REQUESTED]: finishing the in-flight dispatch");
        signal_flag.signal();
    })
    .context("failed to install Ctrl-C handler")?;

    let mut submitter_handle = None;
    let dp_sender = if config.dry_run {
        None
    } else {
        let (username, usertoken) = config.credentials()?;
        let client = SubmissionClient::new(config.server.clone());
        let (sender, receiver) = channel();
        let submit_stop = stop.clone();
        submitter_handle = Some(tokio::spawn(run(client, username, usertoken, receiver, submit_stop)));
        Some(sender)
    };

    let mut miner = GpuMiner::new(
        instance,
        DEFAULT_NUM_WALKERS,
        DEFAULT_STEPS_PER_TASK,
        DEFAULT_MAX_DPS_PER_CALL,
        DEFAULT_WORKGROUP_SIZE,
    )
    .await
    .context("failed to initialise the GPU miner")?;

    info!(
        walkers = DEFAULT_NUM_WALKERS,
        steps_per_task = DEFAULT_STEPS_PER_TASK,
        "🚀 [IGNITION]: GPU miner ready, entering the mining loop"
    );

    while !stop.is_set() {
        let result = miner.advance(config.dp_bits).await.context("GPU dispatch failed")?;

        for (start, end) in result.distinguished_points {
            if config.dry_run {
                println!("dp start={} end={}", hex::encode(&start), hex::encode(&end));
            } else if let Some(sender) = &dp_sender {
                sender.send(SubmittedResult {
                    start: hex::encode(&start),
                    dp: hex::encode(&end),
                });
            }
        }

        info!(hash_rate_mhs = result.hash_rate / 1_000_000.0, "advance complete");
    }

    if let Some(handle) = submitter_handle {
        stop.signal();
        if tokio::time::timeout(Duration::from_secs(2), handle).await.is_err() {
            warn!("⚠️ [SUBMITTER_TIMEOUT]: did not exit within the 2s shutdown grace period");
        }
    }

    info!("✅ [SHUTDOWN_COMPLETE]: miner shut down cleanly");
    Ok(())
}
