//! Process settings read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What to do with the `users` table before serving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bootstrap {
    /// Touch nothing; the table must already exist.
    None,
    /// Create the database and table if missing.
    Create,
    /// Drop and recreate the table on every start.
    Reset,
}

impl FromStr for Bootstrap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Bootstrap::None),
            "create" => Ok(Bootstrap::Create),
            "reset" => Ok(Bootstrap::Reset),
            _ => Err(ConfigError::Invalid {
                key: "BOOTSTRAP",
                value: s.to_string(),
            }),
        }
    }
}

/// Connection parameters for the backing PostgreSQL database.
#[derive(Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DbSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.database)
    }

    /// Options for the `postgres` maintenance database, used to create the target database.
    pub fn admin_connect_options(&self) -> PgConnectOptions {
        self.options_for("postgres")
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub db: DbSettings,
    pub bind_addr: String,
    pub api_key: String,
    pub bootstrap: Bootstrap,
    pub seed_users: bool,
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db = DbSettings {
            host: get("DB_HOST", "localhost"),
            port: parse("DB_PORT", &get("DB_PORT", "5432"))?,
            user: get("DB_USER", "postgres"),
            password: get("DB_PASSWORD", ""),
            database: get("DB_NAME", "godb"),
            max_connections: parse("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
            acquire_timeout: Duration::from_secs(parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                &get("DB_ACQUIRE_TIMEOUT_SECS", "5"),
            )?),
        };
        if db.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Settings {
            db,
            bind_addr: get("BIND_ADDR", "0.0.0.0:3000"),
            api_key: get("API_KEY", "your_api_key"),
            bootstrap: get("BOOTSTRAP", "create").parse()?,
            seed_users: parse_bool("SEED_USERS", &get("SEED_USERS", "false"))?,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
