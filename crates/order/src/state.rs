use crate::{
    config::myconfig::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionManager;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub cors_origins: Vec<String>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl AppState {
    pub fn new(db: ConnectionManager, config: &Config) -> Self {
        Self::from_deps(
            DependenciesInjectDeps::from_connection(db),
            config.cors_origins.clone(),
        )
    }

    pub fn from_deps(deps: DependenciesInjectDeps, cors_origins: Vec<String>) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            cors_origins,
        }
    }
}
