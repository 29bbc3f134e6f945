// [libs/infra/rho-store/src/client.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN STORE UPLINK (V3.0 - SERIALIZED WRITER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE CONEXIÓN Y ESQUEMA
 *
 * Wraps a `libsql::Database`, dispatching to a remote Turso-compatible
 * endpoint, a local file, or an in-memory database depending on the
 * URL scheme, then applies the schema once up front.
 * =================================================================
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::error;

use crate::errors::StoreError;
use crate::schema::apply_schema;

#[derive(Clone)]
pub struct StoreClient {
    database: Arc<Database>,
    // For `:memory:` mode, libsql drops the database when the last
    // connection is dropped; holding one open here keeps the schema
    // alive for the lifetime of the process.
    _memory_anchor: Option<Arc<Connection>>,
}

impl StoreClient {
    pub async fn connect(url: &str, auth_token: Option<String>) -> Result<Self, StoreError> {
        let database = if url.starts_with("libsql://") || url.starts_with("https://") {
            Builder::new_remote(url.to_string(), auth_token.unwrap_or_default())
                .build()
                .await
                .map_err(|e| {
                    error!("❌ [STORE_UNREACHABLE]: remote endpoint refused connection: {e}");
                    StoreError::ConnectionError(e.to_string())
                })?
        } else {
            Builder::new_local(url)
                .build()
                .await
                .map_err(|e| StoreError::ConnectionError(e.to_string()))?
        };

        let anchor_connection = database
            .connect()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        apply_schema(&anchor_connection).await?;

        let memory_anchor = if url == ":memory:" {
            Some(Arc::new(anchor_connection))
        } else {
            None
        };

        Ok(Self {
            database: Arc::new(database),
            _memory_anchor: memory_anchor,
        })
    }

    pub fn connection(&self) -> Result<Connection, StoreError> {
        self.database
            .connect()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))
    }
}
