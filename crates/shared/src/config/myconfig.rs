use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;
use std::{fmt, time::Duration};

/// Returns the first non-empty value among `keys`.
pub fn lookup_first<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
}

pub fn parse_flag(value: Option<String>) -> bool {
    value
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_conn: u32,
    pub min_conn: u32,
    pub retry_delay: Duration,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_conn", &self.max_conn)
            .field("min_conn", &self.min_conn)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup_first(&lookup, &["DATABASE_URL"]);

        let host = lookup_first(&lookup, &["DB_HOST", "PGHOST"])
            .unwrap_or_else(|| "localhost".to_string());

        let port = lookup_first(&lookup, &["DB_PORT", "PGPORT"])
            .unwrap_or_else(|| "5432".to_string())
            .parse::<u16>()
            .context("DB_PORT must be a valid u16 integer")?;

        let user = lookup_first(&lookup, &["DB_USER", "PGUSER"])
            .unwrap_or_else(|| "postgres".to_string());

        let password = lookup_first(&lookup, &["DB_PASSWORD", "PGPASSWORD"]).unwrap_or_default();

        let database = lookup_first(&lookup, &["DB_NAME", "PGDATABASE"])
            .unwrap_or_else(|| "bakery_orders".to_string());

        let max_conn = lookup_first(&lookup, &["DB_MAX_CONNECTION"])
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let min_conn = lookup_first(&lookup, &["DB_MIN_CONNECTION"])
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        let retry_secs = lookup_first(&lookup, &["DB_RETRY_DELAY_SECS"])
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .context("Unable to parse DB_RETRY_DELAY_SECS as u64")?;

        let config = Self {
            url,
            host,
            port,
            user,
            password,
            database,
            max_conn: max_conn.max(1),
            min_conn: min_conn.min(max_conn.max(1)),
            retry_delay: Duration::from_secs(retry_secs),
        };

        config
            .connect_options()
            .context("DATABASE_URL is not a valid postgres connection string")?;

        Ok(config)
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse::<PgConnectOptions>(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}
