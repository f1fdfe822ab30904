use anyhow::{Context, Result, anyhow};
use bakery_order::{
    config::myconfig::Config, handler::AppRouter, schema::OrderSchema, state::AppState,
};
use shared::{config::ConnectionManager, utils::init_logger};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard = init_logger("bakery-order", config.is_dev, config.enable_file_log);

    info!("🔧 Loaded configuration: {:?}", config.database);

    let db = ConnectionManager::new(&config.database, Arc::new(OrderSchema))
        .context("Failed to build database connection manager")?;

    let state = AppState::new(db.clone(), &config);

    let mut supervisor = tokio::spawn(db.run());

    tokio::select! {
        served = AppRouter::serve(config.port, state) => {
            served.context("HTTP server failed")?;
            supervisor.abort();
            info!("✅ Bakery order service shutdown complete.");
            Ok(())
        }
        supervised = &mut supervisor => {
            match supervised {
                Ok(Ok(())) => Err(anyhow!("database supervisor stopped unexpectedly")),
                Ok(Err(e)) => {
                    error!("❌ Fatal database error: {e}");
                    Err(e).context("Database supervisor failed")
                }
                Err(e) => Err(e).context("Database supervisor task panicked"),
            }
        }
    }
}
