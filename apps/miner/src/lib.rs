// [apps/miner/src/lib.rs]
//! =================================================================
//! APARATO: GPU CHAIN-WALKER WORKER BARREL (V2.0)
//! RESPONSABILIDAD: ORQUESTACIÓN DEL DISPOSITIVO Y BUCLE DE MINADO
//!
//! Device orchestration plus the host mining loop and CLI surface
//! the `miner` binary wraps.
//! =================================================================

pub mod config;
pub mod error;
pub mod gpu;

pub use config::MinerConfig;
pub use error::MinerError;
pub use gpu::{AdvanceResult, GpuMiner};
