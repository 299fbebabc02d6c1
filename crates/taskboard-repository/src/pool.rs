//! Database connection pool management.

use crate::store::{Record, SqlStore, SqlValue, StoreError};
use async_trait::async_trait;
use shaku::Component;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo};
use taskboard_config::DatabaseConfig;
use taskboard_core::{TaskboardError, TaskboardResult};
use tracing::{info, warn};

/// PostgreSQL pool wrapper and the production [`SqlStore`].
///
/// The pool is owned by whoever builds it; repositories only hold it as
/// `Arc<dyn SqlStore>`.
#[derive(Component)]
#[shaku(interface = SqlStore)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> TaskboardResult<Self> {
        info!("Connecting to PostgreSQL database...");

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                TaskboardError::storage(e)
            })?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Creates a `DatabasePool` with a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Checks if the database connection is healthy.
    pub async fn health_check(&self) -> TaskboardResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(TaskboardError::storage)?;
        Ok(())
    }

    /// Runs the embedded migrations.
    pub async fn run_migrations(&self) -> TaskboardResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(TaskboardError::storage)?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

/// Binds positional parameters in order.
///
/// `SqlValue::Null` is sent as a TEXT-typed NULL, so it only fits text
/// columns; no statement in this crate binds NULL to any other type.
fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::BigInt(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

fn decode_row(row: &PgRow) -> Result<Record, StoreError> {
    let mut record = Record::with_capacity(row.len());

    for column in row.columns() {
        let name = column.name();
        let index = column.ordinal();
        let scan_err = |e: sqlx::Error| StoreError::column(name, e);

        let value = match column.type_info().name() {
            "INT2" => row
                .try_get::<Option<i16>, _>(index)
                .map_err(scan_err)?
                .map(|v| SqlValue::Int(i32::from(v))),
            "INT4" => row
                .try_get::<Option<i32>, _>(index)
                .map_err(scan_err)?
                .map(SqlValue::Int),
            "INT8" => row
                .try_get::<Option<i64>, _>(index)
                .map_err(scan_err)?
                .map(SqlValue::BigInt),
            "BOOL" => row
                .try_get::<Option<bool>, _>(index)
                .map_err(scan_err)?
                .map(SqlValue::Bool),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(index)
                .map_err(scan_err)?
                .map(SqlValue::Text),
            other => {
                return Err(StoreError::column(
                    name,
                    format!("unsupported column type {other}"),
                ))
            }
        };

        record.push(name, value.unwrap_or(SqlValue::Null));
    }

    Ok(record)
}

#[async_trait]
impl SqlStore for DatabasePool {
    async fn fetch_one(&self, sql: &str, params: &[SqlValue]) -> Result<Record, StoreError> {
        let row = bind_params(sqlx::query(sql), params)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NoRows)?;

        decode_row(&row)
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Record>, StoreError> {
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(decode_row).collect()
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
