use crate::{abstract_trait::health::HealthRepositoryTrait, repository::store_error};
use async_trait::async_trait;
use shared::{config::ConnectionManager, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct HealthRepository {
    db: ConnectionManager,
}

impl HealthRepository {
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthRepositoryTrait for HealthRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await.map_err(|e| store_error(&self.db, e))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| {
                error!("❌ Health check query failed: {:?}", e);
                store_error(&self.db, e)
            })?;

        Ok(())
    }
}
