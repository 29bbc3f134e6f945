// [apps/coordinator/src/state.rs]
//! APARATO: APPLICATION STATE COMPOSITION ROOT
//!
//! The composition root handlers extract via axum's `State`.

use rho_hash::HashInstance;
use rho_store::{CollisionRepository, DpRepository, IngestService, StoreClient, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub dps: DpRepository,
    pub collisions: CollisionRepository,
    pub ingest: IngestService,
    /// The collision-search instance this store's rows were gathered
    /// under. Logged at startup; never enforced on a per-request basis
    /// (§4.4 — the coordinator trusts the worker's claimed `dp`).
    pub instance: HashInstance,
}

impl AppState {
    pub fn new(store: StoreClient, instance: HashInstance) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            dps: DpRepository::new(store.clone()),
            collisions: CollisionRepository::new(store.clone()),
            ingest: IngestService::new(store),
            instance,
        }
    }
}
