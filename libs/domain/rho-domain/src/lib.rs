// [libs/domain/rho-domain/src/lib.rs]
//! =================================================================
//! APARATO: DOMAIN BARREL (V2.0)
//! RESPONSABILIDAD: TIPOS COMPARTIDOS ENTRE ESTRATOS
//!
//! Shared row types and wire DTOs between the coordinator, the
//! miner's submission client, and (indirectly) the finalizer.
//! =================================================================

pub mod entities;
pub mod wire;

pub use entities::{Collision, DistinguishedPoint, User};
pub use wire::{SubmitWorkRequest, SubmitWorkResponse, SubmittedResult};
