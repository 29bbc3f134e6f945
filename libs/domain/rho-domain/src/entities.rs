// [libs/domain/rho-domain/src/entities.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN ENTITY CATALOG (V2.0)
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L2)
 * RESPONSABILIDAD: TIPOS DE FILA DEL ALMACÉN PERSISTENTE
 *
 * These mirror the schema in the store crate field-for-field; they
 * carry no behavior of their own.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// A registered worker identity. Created once by an out-of-scope
/// administrative tool; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub userid: i64,
    pub username: String,
    pub usertoken: String,
    pub userdpcount: i64,
}

/// One reported distinguished point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinguishedPoint {
    pub dpid: i64,
    pub dpuserid: i64,
    pub dpstart: Vec<u8>,
    pub dpend: Vec<u8>,
    pub dptime: i64,
}

/// A recorded pre-collision: two distinct DPs sharing an endpoint.
/// `colldpidone` is the DP that already existed; `colldpidtwo` is the
/// one whose insert triggered this row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub collid: i64,
    pub colldpidone: i64,
    pub colldpidtwo: i64,
}
