use std::{fmt::Display, future::Future, time::Duration};

use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode},
    Connection,
};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::PostgresConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid connection options: {0}")]
    InvalidOptions(String),
    #[error("connection timeout: database still unreachable after {0:?}")]
    Timeout(Duration),
}

/// Handle to a Postgres server that answered a liveness probe.
#[derive(Debug, Clone)]
pub struct Postgres {
    pub pool: PgPool,
}

impl Postgres {
    /// Open a pool and block until the server answers a ping.
    ///
    /// Probes run every `config.interval` until one succeeds or `config.timeout`
    /// elapses. A slow probe may outlast the interval; only the deadline ends
    /// it. Failed probes are retried; malformed options fail immediately.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, ConnectError> {
        let pool = Self::open(config)?;
        wait_until_ready(|| ping(&pool), config.interval(), config.timeout()).await?;
        info!("Connected to postgres at {}:{}.", config.host, config.port);
        Ok(Self { pool })
    }

    /// Build the pool. No connection is made until it is first used.
    pub fn open(config: &PostgresConfig) -> Result<PgPool, ConnectError> {
        if config.host.trim().is_empty() {
            return Err(ConnectError::InvalidOptions("host must not be empty".into()));
        }
        if config.user.trim().is_empty() {
            return Err(ConnectError::InvalidOptions("user must not be empty".into()));
        }
        if config.acquire == 0 {
            return Err(ConnectError::InvalidOptions(
                "acquire timeout must be positive".into(),
            ));
        }
        if config.connections == 0 {
            return Err(ConnectError::InvalidOptions(
                "connections must be at least 1".into(),
            ));
        }

        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(PgSslMode::Disable);
        if let Some(database) = &config.database {
            options = options.database(database);
        }

        Ok(pool_options(config).connect_lazy_with(options))
    }
}

/// Pool settings for the life of the process, independent of the probe cadence.
fn pool_options(config: &PostgresConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.connections)
        .acquire_timeout(config.acquire())
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}

/// Run `probe` every `interval` until it succeeds, giving up after `timeout`.
pub async fn wait_until_ready<F, Fut, E>(
    mut probe: F,
    interval: Duration,
    timeout: Duration,
) -> Result<(), ConnectError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    if interval.is_zero() {
        return Err(ConnectError::InvalidOptions(
            "probe interval must be positive".into(),
        ));
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let attempts = async {
        loop {
            ticker.tick().await;
            match probe().await {
                Ok(()) => return,
                Err(err) => debug!("Database not ready yet: {err}"),
            }
        }
    };

    tokio::time::timeout(timeout, attempts)
        .await
        .map_err(|_| ConnectError::Timeout(timeout))
}
