use crate::domain::requests::order::{INVALID_QUANTITY, INVALID_STATUS, MISSING_FIELDS};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::HttpError;
use std::collections::BTreeSet;
use validator::{Validate, ValidationErrors};

/// JSON body extractor that runs `validator` rules; every rejection is a 400.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(json_value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                HttpError::BadRequest(format!("Invalid JSON: {}", rejection.body_text()))
            })?;

        json_value
            .validate()
            .map_err(|validation_errors| {
                HttpError::BadRequest(format_validation_errors(&validation_errors))
            })?;

        Ok(Self(json_value))
    }
}

// Fixed messages in the order a client should fix them.
const MESSAGE_PRIORITY: [&str; 3] = [MISSING_FIELDS, INVALID_QUANTITY, INVALID_STATUS];

// One message per response: the first fixed one that applies, else the first in sorted order.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages = BTreeSet::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "length" => format!("{field}: Invalid length"),
                    "range" => format!("{field}: Value out of range"),
                    "required" => format!("{field} is required"),
                    _ => format!("Invalid {field}"),
                });
            error_messages.insert(message);
        }
    }

    MESSAGE_PRIORITY
        .iter()
        .find(|fixed| error_messages.contains(**fixed))
        .map(|fixed| fixed.to_string())
        .or_else(|| error_messages.into_iter().next())
        .unwrap_or_else(|| "Validation failed".to_string())
}
