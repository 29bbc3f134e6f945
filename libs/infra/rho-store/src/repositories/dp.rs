// [libs/infra/rho-store/src/repositories/dp.rs]
//! APARATO: DISTINGUISHED POINT REPOSITORY

use libsql::params;
use rho_domain::DistinguishedPoint;

use crate::client::StoreClient;
use crate::errors::StoreError;

pub struct DpRepository {
    client: StoreClient,
}

impl DpRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    pub async fn find_by_end(&self, end: &[u8]) -> Result<Option<DistinguishedPoint>, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection
            .query(
                "SELECT dpid, dpuserid, dpstart, dpend, dptime FROM dp WHERE dpend = ?1 ORDER BY dpid ASC LIMIT 1",
                params![end.to_vec()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(DistinguishedPoint {
                dpid: row.get(0)?,
                dpuserid: row.get(1)?,
                dpstart: row.get(2)?,
                dpend: row.get(3)?,
                dptime: row.get(4)?,
            })),
            None => Ok(None),
        }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection.query("SELECT COUNT(*) FROM dp", ()).await?;
        let row = rows.next().await?.expect("COUNT(*) always returns a row");
        Ok(row.get(0)?)
    }

    /// The `N` most recently reported DPs, newest first — answers the
    /// recency/hashrate-adjacent queries the (out-of-scope) dashboard
    /// needs without materializing a separate rolling-window table.
    pub async fn recent(&self, limit: i64) -> Result<Vec<DistinguishedPoint>, StoreError> {
        let connection = self.client.connection()?;
        let mut rows = connection
            .query(
                "SELECT dpid, dpuserid, dpstart, dpend, dptime FROM dp ORDER BY dptime DESC LIMIT ?1",
                params![limit],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(DistinguishedPoint {
                dpid: row.get(0)?,
                dpuserid: row.get(1)?,
                dpstart: row.get(2)?,
                dpend: row.get(3)?,
                dptime: row.get(4)?,
            });
        }
        Ok(results)
    }
}
