use anyhow::{bail, Result};
use std::env;

use super::database::PoolSettings;
use super::env::{parse_var, string_var};

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Where workout history, the catalog and profiles are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres(PoolSettings),
    Memory,
}

impl StorageBackend {
    /// Resolves `STORAGE_BACKEND`; pool settings are only read for Postgres.
    fn from_lookup<L>(lookup: &L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        match string_var(lookup, "STORAGE_BACKEND", "postgres")
            .trim()
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres(PoolSettings::from_lookup(lookup)?)),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown STORAGE_BACKEND '{}', expected 'postgres' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub storage: StorageBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub(crate) fn from_lookup<L>(lookup: &L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let config = AppConfig {
            host: string_var(lookup, "HOST", "0.0.0.0"),
            port: parse_var(lookup, "PORT", 3000)?,
            environment: string_var(lookup, "ENVIRONMENT", "development"),
            log_level: string_var(lookup, "LOG_LEVEL", "info"),
            jwt_secret: string_var(lookup, "JWT_SECRET", DEFAULT_JWT_SECRET),
            storage: StorageBackend::from_lookup(lookup)?,
        };

        if config.environment == "production" && config.jwt_secret == DEFAULT_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
