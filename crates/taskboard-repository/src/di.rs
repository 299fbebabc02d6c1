//! Dependency injection wiring for the repository layer.

use crate::pool::{DatabasePool, DatabasePoolParameters};
use crate::postgres::{PgTaskRepository, PgUserRepository};
use shaku::module;
use std::sync::Arc;
use taskboard_config::DatabaseConfig;
use taskboard_core::TaskboardResult;
use tracing::info;

module! {
    pub RepositoryModule {
        components = [
            DatabasePool,
            PgUserRepository,
            PgTaskRepository,
        ],
        providers = [],
    }
}

/// Builds the repository module backed by a PostgreSQL pool.
///
/// Migrations run first when `config.run_migrations` is set.
pub async fn build_repository_module(
    config: &DatabaseConfig,
) -> TaskboardResult<Arc<RepositoryModule>> {
    let db_pool = DatabasePool::connect(config).await?;

    if config.run_migrations {
        db_pool.run_migrations().await?;
    }

    let module = RepositoryModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .build();

    info!("Repository module built");
    Ok(Arc::new(module))
}
