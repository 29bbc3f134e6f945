// [libs/infra/rho-store/src/ingest.rs]
/*!
 * =================================================================
 * APARATO: INGEST SERIALIZED WRITER (V3.0 - COLLISION GUARD)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INSERCIÓN ATÓMICA Y DETECCIÓN DE COLISIONES
 *
 * VISION HIPER-HOLÍSTICA:
 * The insert-or-collide algorithm: per-endpoint insert-or-collision,
 * executed inside a single transaction and serialized across requests
 * so the existence-check-then-insert critical section can never race
 * two concurrent submissions of the same endpoint. The reference
 * design is a single serial writer; this is that writer, modeled as a
 * mutex guarding the whole critical section rather than a
 * database-level uniqueness-contention retry loop.
 * =================================================================
 */

use std::sync::Arc;

use libsql::params;
use tokio::sync::Mutex;
use tracing::info;

use crate::client::StoreClient;
use crate::errors::StoreError;

#[derive(Clone)]
pub struct IngestService {
    client: StoreClient,
    write_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub accepted: usize,
    pub collisions: Vec<(i64, i64)>,
}

impl IngestService {
    pub fn new(client: StoreClient) -> Self {
        Self {
            client,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn ingest(
        &self,
        userid: i64,
        decoded: &[(Vec<u8>, Vec<u8>)],
        now: i64,
    ) -> Result<IngestOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let connection = self.client.connection()?;
        let transaction = connection.transaction().await?;

        let mut collisions = Vec::new();
        let mut accepted: i64 = 0;

        for (start, end) in decoded {
            let existing_id = {
                let mut rows = transaction
                    .query(
                        "SELECT dpid FROM dp WHERE dpend = ?1 ORDER BY dpid ASC LIMIT 1",
                        params![end.clone()],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Some(row.get::<i64>(0)?),
                    None => None,
                }
            };

            transaction
                .execute(
                    "INSERT INTO dp (dpuserid, dpstart, dpend, dptime) VALUES (?1, ?2, ?3, ?4)",
                    params![userid, start.clone(), end.clone(), now],
                )
                .await?;
            let new_id = transaction.last_insert_rowid();

            if let Some(existing_id) = existing_id {
                transaction
                    .execute(
                        "INSERT INTO collision (colldpidone, colldpidtwo) VALUES (?1, ?2)",
                        params![existing_id, new_id],
                    )
                    .await?;
                collisions.push((existing_id, new_id));
                info!(existing_dp = existing_id, new_dp = new_id, "💎 [COLLISION_SEALED]: pre-collision recorded");
            }

            accepted += 1;
        }

        if accepted > 0 {
            transaction
                .execute(
                    "UPDATE user SET userdpcount = userdpcount + ?1 WHERE userid = ?2",
                    params![accepted, userid],
                )
                .await?;
        }

        transaction.commit().await?;

        Ok(IngestOutcome {
            accepted: accepted as usize,
            collisions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{CollisionRepository, DpRepository, UserRepository};

    async fn memory_client() -> StoreClient {
        StoreClient::connect(":memory:", None).await.unwrap()
    }

    async fn seed_user(client: &StoreClient, username: &str, token: &str) -> i64 {
        let connection = client.connection().unwrap();
        connection
            .execute(
                "INSERT INTO user (username, usertoken) VALUES (?1, ?2)",
                params![username.to_string(), token.to_string()],
            )
            .await
            .unwrap();
        connection.last_insert_rowid()
    }

    #[tokio::test]
    async fn empty_results_accept_nothing() {
        let client = memory_client().await;
        let userid = seed_user(&client, "alice", "alicetoken").await;
        let service = IngestService::new(client);

        let outcome = service.ingest(userid, &[], 0).await.unwrap();
        assert_eq!(outcome.accepted, 0);
        assert!(outcome.collisions.is_empty());
    }

    #[tokio::test]
    async fn two_distinct_dps_increase_the_user_counter_by_two() {
        let client = memory_client().await;
        let userid = seed_user(&client, "alice", "alicetoken").await;
        let service = IngestService::new(client.clone());

        let decoded = vec![
            (vec![1, 2, 3, 4], vec![0xaa, 0xbb, 0xcc, 0xdd]),
            (vec![5, 6, 7, 8], vec![0x11, 0x22, 0x33, 0x44]),
        ];
        let outcome = service.ingest(userid, &decoded, 1_000).await.unwrap();
        assert_eq!(outcome.accepted, 2);
        assert!(outcome.collisions.is_empty());

        let user = UserRepository::new(client).find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.userdpcount, 2);
    }

    #[tokio::test]
    async fn a_shared_endpoint_from_two_users_records_one_collision() {
        let client = memory_client().await;
        let alice = seed_user(&client, "alice", "alicetoken").await;
        let bob = seed_user(&client, "bob", "bobtoken").await;
        let service = IngestService::new(client.clone());

        let shared_end = vec![0x11; 8];
        service
            .ingest(alice, &[(vec![0xde; 8], shared_end.clone())], 1_000)
            .await
            .unwrap();
        let outcome = service
            .ingest(bob, &[(vec![0xfe; 8], shared_end.clone())], 1_001)
            .await
            .unwrap();

        assert_eq!(outcome.collisions.len(), 1);

        let dp_repo = DpRepository::new(client.clone());
        let collision_repo = CollisionRepository::new(client);
        assert_eq!(dp_repo.count().await.unwrap(), 2);
        assert_eq!(collision_repo.count().await.unwrap(), 1);

        let alice_dp = dp_repo.find_by_end(&shared_end).await.unwrap().unwrap();
        let collisions = collision_repo.list().await.unwrap();
        assert_eq!(collisions[0].colldpidone, alice_dp.dpid);
    }
}
