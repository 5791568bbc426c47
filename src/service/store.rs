//! The store seam used by handlers, and its PostgreSQL implementation.

use super::crud;
use crate::error::AppError;
use crate::gateway::StoreGateway;
use crate::model::User;
use async_trait::async_trait;

/// One logical unit of work per call. Implementations must be safe to share across requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Returns rows inserted.
    async fn create(&self, user: &User) -> Result<u64, AppError>;

    /// Returns rows updated; `0` when no row has `user.id`.
    async fn update(&self, user: &User) -> Result<u64, AppError>;

    /// Returns rows deleted; `0` when no row has `id`.
    async fn delete(&self, id: i32) -> Result<u64, AppError>;

    /// Liveness of the backend, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Acquires a pooled handle per call and releases it when the call returns.
#[derive(Clone)]
pub struct PgUserStore {
    gateway: StoreGateway,
}

impl PgUserStore {
    pub fn new(gateway: StoreGateway) -> Self {
        PgUserStore { gateway }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut handle = self.gateway.acquire().await?;
        crud::list_users(&mut handle).await
    }

    async fn create(&self, user: &User) -> Result<u64, AppError> {
        let mut handle = self.gateway.acquire().await?;
        crud::insert_user(&mut handle, user).await
    }

    async fn update(&self, user: &User) -> Result<u64, AppError> {
        let mut handle = self.gateway.acquire().await?;
        crud::update_user(&mut handle, user).await
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let mut handle = self.gateway.acquire().await?;
        crud::delete_user(&mut handle, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.gateway.ping().await
    }
}
