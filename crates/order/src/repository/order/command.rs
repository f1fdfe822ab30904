use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRecordRequest},
    repository::store_error,
};
use async_trait::async_trait;
use shared::{config::ConnectionManager, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionManager,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<i32, RepositoryError> {
        let pool = self.db.pool().await.map_err(|e| store_error(&self.db, e))?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO orders
                (order_id, customer_name, contact_number, item, quantity, order_date, status,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp, current_timestamp)
            RETURNING id
            "#,
        )
        .bind(&req.order_id)
        .bind(&req.customer_name)
        .bind(&req.contact_number)
        .bind(&req.item)
        .bind(req.quantity)
        .bind(req.order_date)
        .bind(req.status.as_str())
        .fetch_one(&pool)
        .await
        .map_err(|err| {
            if RepositoryError::is_unique_violation(&err) {
                error!("❌ Order {} already exists", req.order_id);
                return RepositoryError::AlreadyExists(format!(
                    "Order with order_id '{}' already exists",
                    req.order_id
                ));
            }

            error!("❌ Failed to create order {}: {:?}", req.order_id, err);
            store_error(&self.db, err)
        })?;

        info!("✅ Created order ID {} ({})", id, req.order_id);
        Ok(id)
    }

    async fn update_order_status(
        &self,
        req: &UpdateOrderStatusRecordRequest,
    ) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await.map_err(|e| store_error(&self.db, e))?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status     = $2,
                updated_at = current_timestamp
            WHERE id = $1
            "#,
        )
        .bind(req.id)
        .bind(req.status.as_str())
        .execute(&pool)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order ID {}: {:?}", req.id, err);
            store_error(&self.db, err)
        })?;

        if result.rows_affected() == 0 {
            info!("🔍 Order ID {} not found for status update", req.id);
            return Err(RepositoryError::NotFound);
        }

        info!("🔄 Updated order ID {} to {}", req.id, req.status);
        Ok(())
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting order: {}", id);

        let pool = self.db.pool().await.map_err(|e| store_error(&self.db, e))?;

        let result = sqlx::query(
            r#"
            DELETE FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete order {}: {:?}", id, e);
            store_error(&self.db, e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
