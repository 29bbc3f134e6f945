// [libs/infra/rho-store/src/lib.rs]
//! =================================================================
//! APARATO: PERSISTENCE BARREL (V3.0)
//! RESPONSABILIDAD: EXPOSICIÓN DEL ESTRATO DE PERSISTENCIA
//!
//! Connection bootstrap, schema, repositories for reads, and the
//! serialized ingest transaction for writes.
//! =================================================================

pub mod client;
pub mod errors;
pub mod ingest;
pub mod repositories;
pub mod schema;

pub use client::StoreClient;
pub use errors::StoreError;
pub use ingest::{IngestOutcome, IngestService};
pub use repositories::{CollisionRepository, DpRepository, UserRepository};
