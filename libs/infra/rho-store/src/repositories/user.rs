// [libs/infra/rho-store/src/repositories/user.rs]
/*!
 * =================================================================
 * APARATO: IDENTITY REPOSITORY (V2.0 - CONSTANT-TIME GUARD)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: AUTENTICACIÓN Y BÚSQUEDA DE USUARIOS
 *
 * Token comparison never short-circuits on byte content — only the
 * length check above it does, and a length mismatch is not treated
 * as a secret worth hiding.
 * =================================================================
 */

use libsql::params;
use rho_domain::User;
use subtle::ConstantTimeEq;
use tracing::instrument;

use crate::client::StoreClient;
use crate::errors::StoreError;

pub struct UserRepository {
    client: StoreClient,
}

impl UserRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection
            .query(
                "SELECT userid, username, usertoken, userdpcount FROM user WHERE username = ?1",
                params![username.to_string()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(User {
                userid: row.get(0)?,
                username: row.get(1)?,
                usertoken: row.get(2)?,
                userdpcount: row.get(3)?,
            })),
            None => Ok(None),
        }
    }

    /// Authenticate by username, then compare the stored and supplied
    /// tokens in constant time. Lengths are compared first (a length
    /// mismatch is not treated as a secret), the byte contents never
    /// short-circuit.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, username: &str, token: &str) -> Result<User, StoreError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;

        let expected = user.usertoken.as_bytes();
        let provided = token.as_bytes();
        let matches = expected.len() == provided.len()
            && bool::from(expected.ct_eq(provided));

        if matches {
            Ok(user)
        } else {
            tracing::debug!(username, "⚠️ [IDENTITY_REJECTED]: token mismatch");
            Err(StoreError::AuthenticationFailed)
        }
    }
}
