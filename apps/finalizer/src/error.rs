// [apps/finalizer/src/error.rs]
//! APARATO: FINALIZER FAULT CATALOG

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinalizeError {
    #[error("A_WALK_EXHAUSTED: chain a did not reach a distinguished point within {max_steps} steps at k={k}")]
    AWalkExhausted { k: u32, max_steps: u64 },

    #[error("CHAINS_DIVERGE: chain b reached a distinguished point without ever meeting chain a (k={k}, {steps} steps)")]
    ChainsDiverge { k: u32, steps: u64 },
}
