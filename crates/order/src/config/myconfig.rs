use anyhow::{Context, Result};
use shared::config::{DatabaseConfig, lookup_first, parse_flag};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup_first(&lookup, &["PORT"])
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        // unset means any origin
        let cors_origins = lookup_first(&lookup, &["CORS_ORIGINS", "ALLOWED_ORIGINS"])
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let is_dev = parse_flag(lookup("DEV_MODE"));
        let enable_file_log = parse_flag(lookup("ENABLE_FILE_LOG"));

        let database = DatabaseConfig::from_lookup(&lookup).context("failed database config")?;

        Ok(Self {
            port,
            cors_origins,
            database,
            is_dev,
            enable_file_log,
        })
    }
}
