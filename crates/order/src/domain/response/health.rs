use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthErrorResponse {
    pub status: String,
    pub database: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "OK".into(),
            database: "Connected".into(),
            timestamp,
        }
    }
}

impl HealthErrorResponse {
    pub fn failed(error: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "ERROR".into(),
            database: "Disconnected".into(),
            error: error.into(),
            timestamp,
        }
    }
}
