// [libs/infra/rho-store/src/schema.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN DATABASE SCHEMA (V2.0)
 * RESPONSABILIDAD: BOOTSTRAP DE TABLAS E ÍNDICES
 *
 * Field names match the wire contract verbatim for
 * cross-implementation compatibility. A `recent` table tracking a
 * rolling DP window is deliberately NOT created here; it would be
 * unused — the `dptime` index already answers recency queries.
 * =================================================================
 */

use libsql::Connection;

use crate::errors::StoreError;

const TABLES: &[(&str, &str)] = &[
    (
        "user",
        "CREATE TABLE IF NOT EXISTS user (
            userid INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            usertoken TEXT NOT NULL,
            userdpcount INTEGER NOT NULL DEFAULT 0
        )",
    ),
    (
        "dp",
        "CREATE TABLE IF NOT EXISTS dp (
            dpid INTEGER PRIMARY KEY AUTOINCREMENT,
            dpuserid INTEGER NOT NULL REFERENCES user(userid),
            dpstart BLOB NOT NULL,
            dpend BLOB NOT NULL,
            dptime INTEGER NOT NULL
        )",
    ),
    (
        "collision",
        "CREATE TABLE IF NOT EXISTS collision (
            collid INTEGER PRIMARY KEY AUTOINCREMENT,
            colldpidone INTEGER NOT NULL REFERENCES dp(dpid),
            colldpidtwo INTEGER NOT NULL REFERENCES dp(dpid)
        )",
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS hashend ON dp(dpend)",
    "CREATE INDEX IF NOT EXISTS hashtime ON dp(dptime)",
];

pub async fn apply_schema(conn: &Connection) -> Result<(), StoreError> {
    for (name, statement) in TABLES {
        conn.execute(statement, ()).await.map_err(|e| {
            tracing::error!(table = *name, error = %e, "❌ [SCHEMA_FAULT]: failed to create table");
            e
        })?;
    }
    for statement in INDEXES {
        conn.execute(statement, ()).await?;
    }
    Ok(())
}
