// [libs/core/rho-hash/src/lib.rs]
/*!
 * =================================================================
 * APARATO: COLLISION SEARCH CORE BARREL (V2.0 - SILICON ALIGNED)
 * CLASIFICACIÓN: DOMAIN ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: PRIMITIVA HASH Y CONTRATO DE KERNEL GPU
 *
 * Shared hash primitive for the collision search: H, the
 * distinguished-point predicate D_k, the instance descriptor that
 * pins down (L, P, S), and the GPU kernel template both the miner
 * and any future backend specialise from.
 * =================================================================
 */

pub mod dp;
pub mod hash;
pub mod instance;
pub mod kernel;
pub mod packing;

pub use dp::{is_distinguished, leading_zero_bits, walk_to_distinguished};
pub use hash::{bytes_to_ascii, hash_once};
pub use instance::{HashInstance, HashInstanceError};
pub use kernel::{KernelParams, CHAIN_WALKER_TEMPLATE};
pub use packing::{pack_bytes_to_words, unpack_words_to_bytes};
