use async_trait::async_trait;
use shared::config::{ConnectionPool, SchemaBootstrap};
use tracing::info;

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id             SERIAL PRIMARY KEY,
    order_id       VARCHAR(50)  NOT NULL UNIQUE,
    customer_name  VARCHAR(255) NOT NULL,
    contact_number VARCHAR(50)  NOT NULL DEFAULT '',
    item           VARCHAR(255) NOT NULL,
    quantity       INTEGER      NOT NULL CHECK (quantity >= 1),
    order_date     DATE         NOT NULL DEFAULT CURRENT_DATE,
    status         VARCHAR(20)  NOT NULL DEFAULT 'Pending'
                   CHECK (status IN ('Pending', 'Completed')),
    created_at     TIMESTAMPTZ  NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at     TIMESTAMPTZ  NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_ORDER_DATE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_orders_order_date
    ON orders (order_date DESC, created_at DESC)
"#;

const SEED_ORDERS: &str = r#"
INSERT INTO orders (order_id, customer_name, contact_number, item, quantity, order_date, status)
VALUES
    ('ORD-001', 'Alice Johnson', '555-0101', 'Chocolate Cake',  1,  DATE '2024-01-15', 'Pending'),
    ('ORD-002', 'Bob Smith',     '555-0102', 'Croissants',      12, DATE '2024-01-16', 'Completed'),
    ('ORD-003', 'Carol White',   '555-0103', 'Sourdough Bread', 2,  DATE '2024-01-17', 'Pending')
ON CONFLICT (order_id) DO NOTHING
"#;

/// Creates the `orders` table when missing and seeds it when empty. Safe to re-run.
#[derive(Debug, Clone, Default)]
pub struct OrderSchema;

#[async_trait]
impl SchemaBootstrap for OrderSchema {
    async fn bootstrap(&self, pool: &ConnectionPool) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_ORDERS_TABLE).execute(pool).await?;
        sqlx::query(CREATE_ORDER_DATE_INDEX).execute(pool).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await?;

        if count == 0 {
            let seeded = sqlx::query(SEED_ORDERS).execute(pool).await?;
            info!("🌱 Seeded {} sample orders", seeded.rows_affected());
        } else {
            info!("📦 Orders table ready ({count} rows)");
        }

        Ok(())
    }
}
