// [apps/coordinator/src/config.rs]
//! APARATO: COORDINATOR CONFIGURATION (ESTRATO L4)

use clap::Parser;

/// The coordinator's runtime configuration. Everything comes from CLI
/// flags or their environment-variable fallbacks (optionally loaded
/// from a local `.env`); there is no separate config file format.
#[derive(Debug, Parser)]
#[command(name = "coordinator", about = "Collision-search coordinator")]
pub struct CoordinatorConfig {
    /// Local sqlite file path, `:memory:`, or a `libsql://`/`https://` remote URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Auth token for a remote Turso-compatible database.
    #[arg(long, env = "TURSO_AUTH_TOKEN")]
    pub turso_auth_token: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix bytes of the collision-search instance, logged at
    /// startup for operator cross-checking; not enforced server-side.
    #[arg(long, env = "HASH_PREFIX_BYTES", default_value_t = 8)]
    pub hash_prefix_bytes: usize,

    /// Suffix bytes of the collision-search instance, logged at
    /// startup for operator cross-checking; not enforced server-side.
    #[arg(long, env = "HASH_SUFFIX_BYTES", default_value_t = 0)]
    pub hash_suffix_bytes: usize,
}
