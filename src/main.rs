use std::sync::Arc;

use fitness_planner::api::create_routes;
use fitness_planner::auth::JwtService;
use fitness_planner::config::{run_migrations, AppConfig, StorageBackend};
use fitness_planner::storage::{InMemoryWorkoutStore, PgWorkoutStore, WorkoutStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.is_development() {
        warn!("Running in development mode");
    }

    let store: Arc<dyn WorkoutStore> = match &config.storage {
        StorageBackend::Postgres(pool_settings) => {
            let pool = pool_settings.connect().await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            Arc::new(PgWorkoutStore::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data is not persisted");
            Arc::new(InMemoryWorkoutStore::new())
        }
    };

    let app = create_routes(store, JwtService::new(&config.jwt_secret));

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Fitness planner starting on http://{} ({})", address, config.environment);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
