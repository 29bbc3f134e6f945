// [apps/miner/src/config.rs]
//! APARATO: MINER CONFIGURATION (ESTRATO L4)

use clap::Parser;

/// `miner <username> <usertoken> [--server URL] [--dp-bits k] [--dry-run]
/// [--hash-prefix-bytes P] [--hash-suffix-bytes S]`. `username` and
/// `usertoken` are positional but fall back to `MINER_USERNAME` /
/// `MINER_USERTOKEN` (via `.env` or the real environment) when omitted,
/// so a worker can be launched unattended from a systemd unit.
#[derive(Debug, Parser)]
#[command(name = "miner", about = "GPU chain-walker worker")]
pub struct MinerConfig {
    /// Worker identity registered with the coordinator.
    #[arg(env = "MINER_USERNAME")]
    pub username: Option<String>,

    /// Shared secret for that identity.
    #[arg(env = "MINER_USERTOKEN")]
    pub usertoken: Option<String>,

    /// Coordinator base URL.
    #[arg(long, default_value = "http://localhost:3000")]
    pub server: String,

    /// Distinguished-point difficulty in bits.
    #[arg(long = "dp-bits", default_value_t = 24)]
    pub dp_bits: u32,

    /// Print distinguished points instead of submitting them.
    #[arg(long)]
    pub dry_run: bool,

    /// Prefix bytes of the collision-search instance.
    #[arg(long = "hash-prefix-bytes", default_value_t = 8)]
    pub hash_prefix_bytes: usize,

    /// Suffix bytes of the collision-search instance.
    #[arg(long = "hash-suffix-bytes", default_value_t = 0)]
    pub hash_suffix_bytes: usize,
}

impl MinerConfig {
    /// Resolve the positional-or-env credential fields, failing fast
    /// with an operator-facing message rather than panicking deep in
    /// the submission client.
    pub fn credentials(&self) -> anyhow::Result<(String, String)> {
        let username = self
            .username
            .clone()
            .ok_or_else(|| anyhow::anyhow!("username required (positional arg or MINER_USERNAME)"))?;
        let usertoken = self
            .usertoken
            .clone()
            .ok_or_else(|| anyhow::anyhow!("usertoken required (positional arg or MINER_USERTOKEN)"))?;
        Ok((username, usertoken))
    }
}
