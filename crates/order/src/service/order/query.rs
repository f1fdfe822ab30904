use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::response::order::OrderResponse,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service", "OrderQueryService");

        Self { query, metrics }
    }

    fn complete(&self, method: Method, started: Instant, is_success: bool, message: &str) {
        let status = if is_success {
            info!("✅ Operation completed successfully: {message}");
            StatusUtils::Success
        } else {
            error!("❌ Operation failed: {message}");
            StatusUtils::Error
        };

        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        info!("📦 Finding all orders");
        let started = Instant::now();

        match self.query.find_all().await {
            Ok(orders) => {
                self.complete(
                    Method::Get,
                    started,
                    true,
                    &format!("Found {} orders", orders.len()),
                );
                Ok(orders.into_iter().map(OrderResponse::from).collect())
            }
            Err(e) => {
                self.complete(
                    Method::Get,
                    started,
                    false,
                    &format!("Failed to find orders: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
