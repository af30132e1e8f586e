//! Database connection utilities.

use atelier_error::{AtelierResult, DatabaseError, DatabaseErrorKind};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// Shared r2d2 connection pool over PostgreSQL.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build a connection pool for the given database URL.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_size` - Maximum number of pooled connections
///
/// # Errors
///
/// Returns a database error if the pool cannot be built or the first
/// connection cannot be established.
pub fn build_pool(database_url: &str, max_size: u32) -> AtelierResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

    // Warm up the pool by getting and immediately releasing a connection
    {
        let _conn = pool
            .get()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;
    }

    Ok(pool)
}

/// Build a connection pool from the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns a database error if `DATABASE_URL` is not set or the pool
/// cannot be built.
pub fn pool_from_env(max_size: u32) -> AtelierResult<PgPool> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;
    build_pool(&database_url, max_size)
}
