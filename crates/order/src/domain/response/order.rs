use crate::model::order::Order as OrderModel;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    pub order_id: String,
    pub customer_name: String,
    pub contact_number: String,
    pub item: String,
    pub quantity: i32,
    pub order_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// model to response
impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            order_id: value.order_id,
            customer_name: value.customer_name,
            contact_number: value.contact_number,
            item: value.item,
            quantity: value.quantity,
            order_date: value.order_date,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderIdResponse {
    pub id: i32,
}

/// Result of a create: the persisted row, or only its id when the re-read failed.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(untagged)]
pub enum CreatedOrderResponse {
    Order(OrderResponse),
    Id(OrderIdResponse),
}
