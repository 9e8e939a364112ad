use std::time::Duration;

use thiserror::Error;

use crate::domain::stats::RevenueBasis;
use crate::domain::status::TransitionPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub status_policy: TransitionPolicy,
    pub revenue_basis: RevenueBasis,
    pub payment_callback_delay: Duration,
    pub seed_catalog: bool,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 8080)?,
            pool_size: parsed(&lookup, "DATABASE_POOL_SIZE", 10)?,
            status_policy: parsed(&lookup, "ORDER_STATUS_POLICY", TransitionPolicy::default())?,
            revenue_basis: parsed(&lookup, "REVENUE_BASIS", RevenueBasis::default())?,
            payment_callback_delay: Duration::from_millis(parsed(
                &lookup,
                "PAYMENT_CALLBACK_DELAY_MS",
                2000,
            )?),
            seed_catalog: parsed(&lookup, "SEED_CATALOG", true)?,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
