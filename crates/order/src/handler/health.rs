use crate::{
    abstract_trait::health::DynHealthService,
    domain::response::{
        api::BannerResponse,
        health::{HealthErrorResponse, HealthResponse},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service banner", body = BannerResponse))
)]
pub async fn root() -> impl IntoResponse {
    Json(BannerResponse {
        message: "Bakery Order Service API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        docs: "/swagger-ui".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 500, description = "Store unreachable", body = HealthErrorResponse)
    )
)]
pub async fn health_check(Extension(service): Extension<DynHealthService>) -> Response {
    match service.check().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            let body = HealthErrorResponse::failed(store_message(err), Utc::now());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn store_message(err: ServiceError) -> String {
    match err {
        ServiceError::Repo(RepositoryError::Sqlx(e)) => e.to_string(),
        other => other.to_string(),
    }
}

pub fn health_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .layer(Extension(app_state.di_container.health.clone()))
}
