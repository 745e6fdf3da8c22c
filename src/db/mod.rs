pub mod enums;
pub mod models;
pub mod repositories;

use crate::error::{AppError, AppResult};
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use diesel::{Connection, PgConnection};
use std::time::Duration;

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

pub fn build_pool(config: &crate::config::Config) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .min_idle(Some(config.database_min_connections))
        .connection_timeout(Duration::from_secs(config.database_connection_timeout))
        .build(manager)
        .map_err(AppError::from)
}

/// Runs one request-scoped unit of work on the blocking pool, inside a single
/// database transaction. Authorization and the mutation it guards therefore
/// observe the same snapshot, and any error rolls the whole unit back.
pub async fn transact<T, F>(pool: &DbPool, work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut pooled = pool.get()?;
        let conn: &mut PgConnection = &mut pooled;
        conn.transaction::<T, AppError, _>(|tx| work(tx))
    })
    .await
    .map_err(|e| AppError::internal(format!("blocking task failed: {}", e)))?
}
