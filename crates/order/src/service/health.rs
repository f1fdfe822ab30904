use crate::{
    abstract_trait::health::{DynHealthRepository, HealthServiceTrait},
    domain::response::health::HealthResponse,
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::error;

#[derive(Clone)]
pub struct HealthService {
    repository: DynHealthRepository,
    metrics: Metrics,
}

impl HealthService {
    pub fn new(repository: DynHealthRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "health_service", "HealthService");

        Self {
            repository,
            metrics,
        }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn check(&self) -> Result<HealthResponse, ServiceError> {
        let started = Instant::now();

        match self.repository.ping().await {
            Ok(()) => {
                self.metrics.record(
                    Method::Get,
                    StatusUtils::Success,
                    started.elapsed().as_secs_f64(),
                );
                Ok(HealthResponse::ok(Utc::now()))
            }
            Err(e) => {
                error!("❌ Health check failed: {e}");
                self.metrics.record(
                    Method::Get,
                    StatusUtils::Error,
                    started.elapsed().as_secs_f64(),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
