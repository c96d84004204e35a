//! Backend entry-point: parses configuration and runs the billing HTTP
//! server.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::billing::{
    BillingPolicy, DEFAULT_GRACE_DAYS, DEFAULT_LOOKBACK_MONTHS, GracePolicy,
};
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, create_server};

/// Membership billing backend.
///
/// All options can be supplied as flags or environment variables; flags win.
#[derive(Debug, Parser)]
#[command(name = "backend", version)]
struct Cli {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL. Omit to run on in-memory fixtures.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// File holding the session cookie signing key material.
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: PathBuf,

    /// Permit an ephemeral session key when the key file is unreadable.
    /// Always permitted in debug builds.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL")]
    allow_ephemeral_key: bool,

    /// Whether the session cookie requires HTTPS.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    cookie_secure: bool,

    /// Grace days at the start of each month before the current period is
    /// considered owed. Zero disables the grace window.
    #[arg(long, env = "GRACE_DAYS", default_value_t = DEFAULT_GRACE_DAYS)]
    grace_days: u32,

    /// Number of trailing billing periods evaluated per member.
    #[arg(long, env = "LOOKBACK_MONTHS", default_value_t = DEFAULT_LOOKBACK_MONTHS)]
    lookback_months: usize,
}

impl Cli {
    fn billing_policy(&self) -> BillingPolicy {
        BillingPolicy {
            lookback_months: self.lookback_months,
            grace: GracePolicy::new(self.grace_days),
        }
    }

    /// Read the cookie signing key, falling back to an ephemeral key when
    /// permitted. Production deployments mount the key file.
    fn session_key(&self) -> std::io::Result<Key> {
        match std::fs::read(&self.session_key_file) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(error) => {
                if cfg!(debug_assertions) || self.allow_ephemeral_key {
                    warn!(
                        path = %self.session_key_file.display(),
                        %error,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(format!(
                        "failed to read session key at {}: {error}",
                        self.session_key_file.display()
                    )))
                }
            }
        }
    }
}

async fn database_pool(cli: &Cli) -> std::io::Result<Option<DbPool>> {
    let Some(url) = &cli.database_url else {
        warn!("no database URL configured; running on in-memory fixtures");
        return Ok(None);
    };
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(|error| std::io::Error::other(format!("database pool: {error}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let cli = Cli::parse();
    let key = cli.session_key()?;

    let mut config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr)
        .with_policy(cli.billing_policy());
    if let Some(pool) = database_pool(&cli).await? {
        config = config.with_db_pool(pool);
    }

    info!(addr = %config.bind_addr(), "starting billing server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
