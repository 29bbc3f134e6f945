// [apps/finalizer/src/config.rs]
//! APARATO: FINALIZER CONFIGURATION (ESTRATO L4)

use clap::Parser;

/// `finalize <start_a_hex> <start_b_hex> [--dp-bits k]
/// [--hash-prefix-bytes P] [--hash-suffix-bytes S]`. An offline tool;
/// it reads no coordinator state and talks to no network.
#[derive(Debug, Parser)]
#[command(name = "finalize", about = "Recover the exact colliding pair from two converging starts")]
pub struct FinalizerConfig {
    /// Hex-encoded start of the first chain.
    pub start_a: String,

    /// Hex-encoded start of the second chain.
    pub start_b: String,

    /// Distinguished-point difficulty the two starts were mined at.
    #[arg(long = "dp-bits", default_value_t = 24)]
    pub dp_bits: u32,

    /// Prefix bytes of the collision-search instance.
    #[arg(long = "hash-prefix-bytes", default_value_t = 8)]
    pub hash_prefix_bytes: usize,

    /// Suffix bytes of the collision-search instance.
    #[arg(long = "hash-suffix-bytes", default_value_t = 0)]
    pub hash_suffix_bytes: usize,
}
