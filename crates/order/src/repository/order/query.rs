use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::order::Order as OrderModel, repository::store_error,
};
use async_trait::async_trait;
use shared::{config::ConnectionManager, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionManager,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("🔍 Fetching all orders");

        let pool = self.db.pool().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            store_error(&self.db, e)
        })?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, order_id, customer_name, contact_number, item, quantity,
                   order_date, status, created_at, updated_at
            FROM orders
            ORDER BY order_date DESC, created_at DESC, id DESC
            "#,
        )
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            store_error(&self.db, e)
        })?;

        info!("✅ Found {} orders", orders.len());
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        let pool = self.db.pool().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            store_error(&self.db, e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, order_id, customer_name, contact_number, item, quantity,
                   order_date, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            store_error(&self.db, e)
        })?;

        Ok(order)
    }
}
