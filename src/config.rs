use std::{net::SocketAddr, time::Duration};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration bundled into the binary, overlaid by `APP_*` variables.
pub const DEFAULT_CONFIGURATION: &str = include_str!("config.yml");

pub const ENV_PREFIX: &str = "APP_";

/// Keys whose environment values are taken verbatim. figment would otherwise
/// parse `APP_POSTGRES_PASSWORD=007` into the number 7.
const TEXT_KEYS: &[&str] = &[
    "postgres.host",
    "postgres.user",
    "postgres.password",
    "postgres.database",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host:        String,
    pub port:        u16,
    pub user:        String,
    pub password:    String,
    pub database:    Option<String>,
    /// Seconds to wait for the database at startup.
    pub timeout:     u64,
    /// Seconds between liveness probes.
    pub interval:    u64,
    /// Seconds a query waits for a free pooled connection.
    pub acquire:     u64,
    pub connections: u32,
}

impl PostgresConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn acquire(&self) -> Duration {
        Duration::from_secs(self.acquire)
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host:        "localhost".into(),
            port:        5432,
            user:        "postgres".into(),
            password:    "postgres".into(),
            database:    None,
            timeout:     60,
            interval:    1,
            acquire:     30,
            connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [0, 0, 0, 0].into(),
            port: 8080,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub server:   ServerConfig,
}

impl Config {
    /// Defaults, then the bundled YAML, then the environment.
    ///
    /// `APP_POSTGRES_HOST` sets `postgres.host`: the prefix is stripped, the
    /// rest lower-cased and split on `_`. Values of text fields are kept as
    /// written; everything else is parsed.
    pub fn figment() -> Figment {
        let env = Env::prefixed(ENV_PREFIX).split("_");
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::string(DEFAULT_CONFIGURATION))
            .merge(env.clone().ignore(TEXT_KEYS));
        env.only(TEXT_KEYS)
            .iter()
            .fold(figment, |figment, (key, value)| {
                figment.merge(Serialized::default(key.as_str(), value))
            })
    }

    pub fn read() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// The configuration as pretty JSON, with the password masked.
    pub fn redacted(&self) -> serde_json::Result<String> {
        let mut shown = self.clone();
        shown.postgres.password = "********".into();
        serde_json::to_string_pretty(&shown)
    }
}
