use crate::{
    abstract_trait::{
        health::{DynHealthRepository, DynHealthService},
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderCommandService, DynOrderQueryService},
        },
    },
    repository::{
        health::HealthRepository,
        order::{OrderCommandRepository, OrderQueryRepository},
    },
    service::{
        health::HealthService,
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionManager;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub health: DynHealthService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .field("health", &"HealthService")
            .finish()
    }
}

/// Repositories the services are built on; swap these to run against another store.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub health: DynHealthRepository,
}

impl DependenciesInjectDeps {
    pub fn from_connection(db: ConnectionManager) -> Self {
        Self {
            order_query: Arc::new(OrderQueryRepository::new(db.clone())),
            order_command: Arc::new(OrderCommandRepository::new(db.clone())),
            health: Arc::new(HealthRepository::new(db)),
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            order_query,
            order_command,
            health,
        } = deps;

        let order_query_service: DynOrderQueryService =
            Arc::new(OrderQueryService::new(order_query.clone(), registry));

        let order_command_service: DynOrderCommandService = Arc::new(OrderCommandService::new(
            OrderCommandServiceDeps {
                command: order_command,
                query: order_query,
            },
            registry,
        ));

        let health_service: DynHealthService = Arc::new(HealthService::new(health, registry));

        Self {
            order_query: order_query_service,
            order_command: order_command_service,
            health: health_service,
        }
    }
}
