// [libs/infra/rho-store/src/repositories/collision.rs]
//! APARATO: COLLISION LEDGER REPOSITORY

use libsql::params;
use rho_domain::Collision;

use crate::client::StoreClient;
use crate::errors::StoreError;

pub struct CollisionRepository {
    client: StoreClient,
}

impl CollisionRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection.query("SELECT COUNT(*) FROM collision", ()).await?;
        let row = rows.next().await?.expect("COUNT(*) always returns a row");
        Ok(row.get(0)?)
    }

    pub async fn list(&self) -> Result<Vec<Collision>, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection
            .query(
                "SELECT collid, colldpidone, colldpidtwo FROM collision ORDER BY collid",
                (),
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Collision {
                collid: row.get(0)?,
                colldpidone: row.get(1)?,
                colldpidtwo: row.get(2)?,
            });
        }
        Ok(results)
    }
}
