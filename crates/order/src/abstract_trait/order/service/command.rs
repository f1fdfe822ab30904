use crate::domain::{
    requests::order::{CreateOrderRequest, UpdateOrderStatusRequest},
    response::{
        api::{ApiResponse, MessageResponse},
        order::{CreatedOrderResponse, OrderResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        req: CreateOrderRequest,
    ) -> Result<CreatedOrderResponse, ServiceError>;
    async fn update_order_status(
        &self,
        id: i32,
        req: UpdateOrderStatusRequest,
    ) -> Result<MessageResponse, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
