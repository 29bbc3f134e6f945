// [libs/infra/rho-store/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY ACCESS MATRIX (V2.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN NOMINAL DE LOS REPOSITORIOS DE LECTURA
 * =================================================================
 */

/// Registro de colisiones entre puntos distinguidos.
pub mod collision;
/// Acceso a puntos distinguidos (DP).
pub mod dp;
/// Identidad y autenticación de usuarios.
pub mod user;

pub use collision::CollisionRepository;
pub use dp::DpRepository;
pub use user::UserRepository;
