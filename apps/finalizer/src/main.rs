// [apps/finalizer/src/main.rs]
/*!
 * =================================================================
 * APARATO: FINALIZER MAIN ENTRY POINT (V2.0)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: VALIDACIÓN DE ENTRADA Y EJECUCIÓN OFFLINE
 * =================================================================
 */

use anyhow::Context;
use clap::Parser;
use rho_finalizer::config::FinalizerConfig;
use rho_hash::HashInstance;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    rho_telemetry::init_tracing("finalizer");

    let config = FinalizerConfig::parse();
    let instance = HashInstance::new(config.hash_prefix_bytes, config.hash_suffix_bytes)
        .context("invalid hash instance: prefix_bytes + suffix_bytes must be in 1..=27")?;

    let start_a = hex::decode(&config.start_a).context("start_a is not valid hex")?;
    let start_b = hex::decode(&config.start_b).context("start_b is not valid hex")?;
    let expected_len = instance.total_bytes();
    anyhow::ensure!(
        start_a.len() == expected_len && start_b.len() == expected_len,
        "both starts must be {expected_len} bytes under this instance"
    );

    info!(?instance, dp_bits = config.dp_bits, "🚀 [RENDEZVOUS_START]: finalizing");

    let (x_a, x_b) = rho_finalizer::finalize(&start_a, &start_b, config.dp_bits, &instance)
        .context("finalization failed")?;

    println!("x_a = {}", hex::encode(&x_a));
    println!("x_b = {}", hex::encode(&x_b));
    Ok(())
}
