use crate::config::DatabaseConfig;
use async_trait::async_trait;
use sqlx::{
    Connection, Pool, Postgres,
    postgres::{PgConnectOptions, PgConnection, PgPoolOptions},
};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::sync::{Notify, RwLock, watch};
use tracing::{error, info, warn};

pub type ConnectionPool = Pool<Postgres>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
        }
    }
}

/// Schema work run after every successful connect.
#[async_trait]
pub trait SchemaBootstrap {
    async fn bootstrap(&self, pool: &ConnectionPool) -> Result<(), sqlx::Error>;
}

pub type DynSchemaBootstrap = Arc<dyn SchemaBootstrap + Send + Sync>;

/// Whether `err` means the link to the store is gone rather than the statement failing.
pub fn is_connection_lost(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| is_connection_sqlstate(&code))
            .unwrap_or(false),
        _ => false,
    }
}

// 08xxx: connection exception, 57P01-57P03: server shutting down or unavailable.
fn is_connection_sqlstate(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03")
}

struct Inner {
    options: PgConnectOptions,
    max_conn: u32,
    min_conn: u32,
    retry_delay: Duration,
    bootstrap: DynSchemaBootstrap,
    pool: RwLock<Option<ConnectionPool>>,
    state: watch::Sender<ConnectionState>,
    lost: Notify,
    attempts: AtomicU64,
}

/// Owns the store pool and keeps it alive: fixed-delay reconnects, forever.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("state", &self.state())
            .field("retry_delay", &self.inner.retry_delay)
            .field("attempts", &self.attempts())
            .finish()
    }
}

impl ConnectionManager {
    pub fn new(config: &DatabaseConfig, bootstrap: DynSchemaBootstrap) -> Result<Self, sqlx::Error> {
        let options = config.connect_options()?;

        Ok(Self::with_options(
            options,
            config.max_conn,
            config.min_conn,
            config.retry_delay,
            bootstrap,
        ))
    }

    pub fn with_options(
        options: PgConnectOptions,
        max_conn: u32,
        min_conn: u32,
        retry_delay: Duration,
        bootstrap: DynSchemaBootstrap,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            inner: Arc::new(Inner {
                options,
                max_conn,
                min_conn,
                retry_delay,
                bootstrap,
                pool: RwLock::new(None),
                state,
                lost: Notify::new(),
                attempts: AtomicU64::new(0),
            }),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    pub fn attempts(&self) -> u64 {
        self.inner.attempts.load(Ordering::Relaxed)
    }

    /// Current pool, or `PoolClosed` while no connection is established.
    pub async fn pool(&self) -> Result<ConnectionPool, sqlx::Error> {
        self.inner
            .pool
            .read()
            .await
            .clone()
            .ok_or(sqlx::Error::PoolClosed)
    }

    /// Hands a store error to the supervisor; only connection losses act on it.
    pub fn report(&self, err: &sqlx::Error) {
        if !is_connection_lost(err) {
            return;
        }

        let was_connected = self.inner.state.send_if_modified(|state| {
            if *state == ConnectionState::Connected {
                *state = ConnectionState::Disconnected;
                true
            } else {
                false
            }
        });

        if was_connected {
            warn!("⚠️ Database connection lost: {err}");
            self.inner.lost.notify_one();
        }
    }

    /// Connects, retrying every `retry_delay` until the store answers, then bootstraps.
    ///
    /// Only a bootstrap failure that is not a connection loss is returned as an error.
    pub async fn connect(&self) -> Result<ConnectionPool, sqlx::Error> {
        loop {
            let attempt = self.inner.attempts.fetch_add(1, Ordering::Relaxed) + 1;
            self.set_state(ConnectionState::Connecting);
            info!("🔌 Connecting to database (attempt {attempt})");

            let pool = match self.open_pool().await {
                Ok(pool) => pool,
                Err(err) => {
                    self.set_state(ConnectionState::Disconnected);
                    error!(
                        "❌ Database connection failed: {err}. Retrying in {}s...",
                        self.inner.retry_delay.as_secs_f64()
                    );
                    tokio::time::sleep(self.inner.retry_delay).await;
                    continue;
                }
            };

            match self.inner.bootstrap.bootstrap(&pool).await {
                Ok(()) => {
                    *self.inner.pool.write().await = Some(pool.clone());
                    self.set_state(ConnectionState::Connected);
                    info!("✅ Connected to database");
                    return Ok(pool);
                }
                Err(err) if is_connection_lost(&err) => {
                    pool.close().await;
                    self.set_state(ConnectionState::Disconnected);
                    error!(
                        "❌ Connection lost during schema bootstrap: {err}. Retrying in {}s...",
                        self.inner.retry_delay.as_secs_f64()
                    );
                    tokio::time::sleep(self.inner.retry_delay).await;
                }
                Err(err) => {
                    pool.close().await;
                    self.set_state(ConnectionState::Disconnected);
                    error!("❌ Schema bootstrap failed: {err}");
                    return Err(err);
                }
            }
        }
    }

    /// Supervises the connection for the life of the process.
    ///
    /// Returns only on a fatal store error.
    pub async fn run(self) -> Result<(), sqlx::Error> {
        loop {
            let pool = self.connect().await?;
            self.wait_for_loss(&pool).await?;

            self.inner.pool.write().await.take();
            pool.close().await;
            warn!("🔄 Re-entering database retry loop");
        }
    }

    async fn wait_for_loss(&self, pool: &ConnectionPool) -> Result<(), sqlx::Error> {
        loop {
            self.inner.lost.notified().await;

            match sqlx::query("SELECT 1").execute(pool).await {
                Ok(_) => {
                    info!("✅ Database reachable again, keeping current pool");
                    self.set_state(ConnectionState::Connected);
                }
                Err(err) if is_connection_lost(&err) => {
                    self.set_state(ConnectionState::Disconnected);
                    return Ok(());
                }
                Err(err) => {
                    error!("❌ Fatal database error: {err}");
                    return Err(err);
                }
            }
        }
    }

    // One connection attempt; the pool itself fills lazily once the store answered.
    async fn open_pool(&self) -> Result<ConnectionPool, sqlx::Error> {
        let probe = PgConnection::connect_with(&self.inner.options).await?;
        probe.close().await?;

        Ok(PgPoolOptions::new()
            .max_connections(self.inner.max_conn)
            .min_connections(self.inner.min_conn)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(self.inner.options.clone()))
    }

    fn set_state(&self, next: ConnectionState) {
        self.inner.state.send_replace(next);
    }
}
