use crate::{
    abstract_trait::order::{
        repository::{DynOrderCommandRepository, DynOrderQueryRepository},
        service::OrderCommandServiceTrait,
    },
    domain::{
        requests::order::{CreateOrderRequest, UpdateOrderStatusRequest},
        response::{
            api::{ApiResponse, MessageResponse},
            order::{CreatedOrderResponse, OrderIdResponse, OrderResponse},
        },
    },
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let OrderCommandServiceDeps { command, query } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service", "OrderCommandService");

        Self {
            command,
            query,
            metrics,
        }
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

    fn fail<E: Into<ServiceError>>(&self, method: Method, started: Instant, err: E) -> ServiceError {
        let err = err.into();
        self.complete(method, started, false, &err.to_string());
        err
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: CreateOrderRequest,
    ) -> Result<CreatedOrderResponse, ServiceError> {
        let started = Instant::now();

        let record = req
            .into_record(Utc::now().date_naive())
            .map_err(|e| self.fail(Method::Post, started, e))?;

        info!("🏗️ Creating new order order_id={}", record.order_id);

        let id = self
            .command
            .create_order(&record)
            .await
            .map_err(|e| self.fail(Method::Post, started, e))?;

        // The insert already succeeded; a failed re-read only downgrades the response.
        let response = match self.query.find_by_id(id).await {
            Ok(Some(order)) => CreatedOrderResponse::Order(OrderResponse::from(order)),
            Ok(None) => {
                warn!("⚠️ Order ID {id} vanished before it could be re-read");
                CreatedOrderResponse::Id(OrderIdResponse { id })
            }
            Err(e) => {
                warn!("⚠️ Failed to re-read created order ID {id}: {e}");
                CreatedOrderResponse::Id(OrderIdResponse { id })
            }
        };

        self.complete(
            Method::Post,
            started,
            true,
            &format!("Created order {} (ID {id})", record.order_id),
        );

        Ok(response)
    }

    async fn update_order_status(
        &self,
        id: i32,
        req: UpdateOrderStatusRequest,
    ) -> Result<MessageResponse, ServiceError> {
        let started = Instant::now();

        let record = req
            .into_record(id)
            .map_err(|e| self.fail(Method::Put, started, e))?;

        info!("🔄 Updating order ID {} to status {}", id, record.status);

        self.command
            .update_order_status(&record)
            .await
            .map_err(|e| self.fail(Method::Put, started, e))?;

        self.complete(
            Method::Put,
            started,
            true,
            &format!("Updated order ID {id} to {}", record.status),
        );

        Ok(MessageResponse::success("Order status updated successfully"))
    }

    async fn delete_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let started = Instant::now();

        info!("🗑️ Deleting order ID {id}");

        let existing = self
            .query
            .find_by_id(id)
            .await
            .map_err(|e| self.fail(Method::Delete, started, e))?;

        let Some(order) = existing else {
            return Err(self.fail(Method::Delete, started, RepositoryError::NotFound));
        };

        // A concurrent delete between the read and this call surfaces as NotFound.
        self.command
            .delete_order(id)
            .await
            .map_err(|e| self.fail(Method::Delete, started, e))?;

        self.complete(
            Method::Delete,
            started,
            true,
            &format!("Deleted order ID {id} ({})", order.order_id),
        );

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order deleted successfully".into(),
            data: OrderResponse::from(order),
        })
    }
}
