// Environment-driven configuration

pub mod app;
pub mod database;
mod env;

pub use app::{AppConfig, StorageBackend};
pub use database::{run_migrations, PoolSettings};
