//! Store gateway: a bounded PostgreSQL pool that hands out one connection per unit of work.

use crate::config::DbSettings;
use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::Connection;

/// A live connection scoped to one unit of work. Dropping it returns it to the pool.
pub type Handle = PoolConnection<Postgres>;

#[derive(Clone)]
pub struct StoreGateway {
    pool: PgPool,
}

impl StoreGateway {
    /// Open the pool and verify the backend answers a ping before returning.
    pub async fn connect(settings: &DbSettings) -> Result<Self, AppError> {
        tracing::debug!(
            host = %settings.host,
            port = settings.port,
            database = %settings.database,
            max_connections = settings.max_connections,
            "connecting to store"
        );
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(settings.connect_options())
            .await
            .map_err(AppError::Connection)?;
        let gateway = StoreGateway { pool };
        gateway.ping().await?;
        Ok(gateway)
    }

    /// Wrap an existing pool (the caller owns its sizing).
    pub fn from_pool(pool: PgPool) -> Self {
        StoreGateway { pool }
    }

    pub async fn acquire(&self) -> Result<Handle, AppError> {
        self.pool.acquire().await.map_err(AppError::Connection)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        let mut handle = self.acquire().await?;
        handle.ping().await.map_err(AppError::Connection)
    }

    /// Wait for checked-out handles to come back, then close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
