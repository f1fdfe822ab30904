use crate::domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRecordRequest};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and returns its generated surrogate id.
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<i32, RepositoryError>;
    async fn update_order_status(
        &self,
        req: &UpdateOrderStatusRecordRequest,
    ) -> Result<(), RepositoryError>;
    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError>;
}
