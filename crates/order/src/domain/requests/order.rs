use crate::model::order::OrderStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::errors::ServiceError;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MISSING_FIELDS: &str = "Missing required fields: order_id, customer_name, item, quantity";
pub const INVALID_QUANTITY: &str = "Quantity must be a positive integer";
pub const INVALID_STATUS: &str = "Invalid status. Must be 'Pending' or 'Completed'";

/// Body of `POST /api/orders`.
///
/// Every field is optional at the JSON level so a missing or mistyped value
/// surfaces as a validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(
        required(message = "Missing required fields: order_id, customer_name, item, quantity"),
        length(min = 1, message = "Missing required fields: order_id, customer_name, item, quantity")
    )]
    #[schema(example = "ORD-1042")]
    pub order_id: Option<String>,

    #[validate(
        required(message = "Missing required fields: order_id, customer_name, item, quantity"),
        length(min = 1, message = "Missing required fields: order_id, customer_name, item, quantity")
    )]
    #[schema(example = "Jane Doe")]
    pub customer_name: Option<String>,

    #[schema(example = "555-0199")]
    pub contact_number: Option<String>,

    #[validate(
        required(message = "Missing required fields: order_id, customer_name, item, quantity"),
        length(min = 1, message = "Missing required fields: order_id, customer_name, item, quantity")
    )]
    #[schema(example = "Blueberry Muffins")]
    pub item: Option<String>,

    #[validate(
        required(message = "Missing required fields: order_id, customer_name, item, quantity"),
        custom(function = "validate_quantity")
    )]
    #[schema(value_type = i32, example = 6)]
    pub quantity: Option<Value>,

    #[schema(example = "2024-01-16")]
    pub order_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_status"))]
    #[schema(value_type = Option<OrderStatus>)]
    pub status: Option<String>,
}

/// Body of `PUT /api/orders/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(
        required(message = "Invalid status. Must be 'Pending' or 'Completed'"),
        custom(function = "validate_status")
    )]
    #[schema(value_type = OrderStatus)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRecordRequest {
    pub order_id: String,
    pub customer_name: String,
    pub contact_number: String,
    pub item: String,
    pub quantity: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrderStatusRecordRequest {
    pub id: i32,
    pub status: OrderStatus,
}

/// Accepts a JSON integer or a string holding one; anything below 1 or outside `i32` is rejected.
pub fn parse_quantity(value: &Value) -> Option<i32> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    parsed.filter(|q| *q >= 1)
}

fn validate_quantity(value: &Value) -> Result<(), ValidationError> {
    match parse_quantity(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("quantity").with_message(Cow::Borrowed(INVALID_QUANTITY))),
    }
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<OrderStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status").with_message(Cow::Borrowed(INVALID_STATUS)))
}

fn required(value: Option<String>) -> Result<String, ServiceError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::Validation(vec![MISSING_FIELDS.to_string()]))
}

impl CreateOrderRequest {
    /// Applies defaults and re-checks the invariants the extractor already validated.
    pub fn into_record(self, today: NaiveDate) -> Result<CreateOrderRecordRequest, ServiceError> {
        let order_id = required(self.order_id)?;
        let customer_name = required(self.customer_name)?;
        let item = required(self.item)?;

        let quantity = match self.quantity {
            None | Some(Value::Null) => {
                return Err(ServiceError::Validation(vec![MISSING_FIELDS.to_string()]));
            }
            Some(value) => parse_quantity(&value)
                .ok_or_else(|| ServiceError::Validation(vec![INVALID_QUANTITY.to_string()]))?,
        };

        let status = match self.status {
            Some(raw) => raw
                .parse::<OrderStatus>()
                .map_err(|_| ServiceError::Validation(vec![INVALID_STATUS.to_string()]))?,
            None => OrderStatus::default(),
        };

        Ok(CreateOrderRecordRequest {
            order_id,
            customer_name,
            contact_number: self.contact_number.unwrap_or_default(),
            item,
            quantity,
            order_date: self.order_date.unwrap_or(today),
            status,
        })
    }
}

impl UpdateOrderStatusRequest {
    pub fn into_record(self, id: i32) -> Result<UpdateOrderStatusRecordRequest, ServiceError> {
        let status = self
            .status
            .as_deref()
            .and_then(|raw| raw.parse::<OrderStatus>().ok())
            .ok_or_else(|| ServiceError::Validation(vec![INVALID_STATUS.to_string()]))?;

        Ok(UpdateOrderStatusRecordRequest { id, status })
    }
}
