//! PostgreSQL-backed generation store.

use crate::{GenerationRow, NewGenerationRow, PgPool};
use atelier_core::{Generation, GenerationId, GenerationOutput, GenerationStatus, TenantId};
use atelier_error::{
    AtelierError, AtelierResult, DatabaseError, DatabaseErrorKind, StoreError, StoreErrorKind,
};
use atelier_store::GenerationStore;
use diesel::dsl::sql;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use tracing::{debug, instrument};

/// Generation store backed by PostgreSQL with r2d2 connection pooling.
///
/// Every operation clones the pool handle and runs its Diesel work on the
/// blocking thread pool. Tenant scoping happens in SQL: every statement
/// filters by `tenant_id`, so a foreign tenant's record is never
/// observable through this store.
#[derive(Debug, Clone)]
pub struct PostgresGenerationStore {
    pool: PgPool,
}

impl PostgresGenerationStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store from the `DATABASE_URL` environment variable.
    ///
    /// Uses a default pool size of 10 connections.
    ///
    /// # Errors
    ///
    /// Returns a database error if `DATABASE_URL` is not set or the pool
    /// cannot be built.
    pub fn from_env() -> AtelierResult<Self> {
        Self::with_pool_size(10)
    }

    /// Create a store from `DATABASE_URL` with a custom pool size.
    ///
    /// # Errors
    ///
    /// Returns a database error if `DATABASE_URL` is not set or the pool
    /// cannot be built.
    pub fn with_pool_size(pool_size: u32) -> AtelierResult<Self> {
        Ok(Self::new(crate::pool_from_env(pool_size)?))
    }
}

/// Diagnose a conditional status update that matched no rows.
fn transition_failure(
    conn: &mut PgConnection,
    tenant: TenantId,
    id: GenerationId,
    to: GenerationStatus,
) -> AtelierError {
    use crate::schema::generations::dsl;

    let current: Result<Option<String>, _> = dsl::generations
        .filter(dsl::id.eq(id.as_uuid()))
        .filter(dsl::tenant_id.eq(tenant.as_uuid()))
        .select(dsl::status)
        .first(conn)
        .optional();

    match current {
        Ok(Some(from)) => StoreError::new(StoreErrorKind::InvalidTransition {
            id: id.to_string(),
            from,
            to: to.as_str().to_string(),
        })
        .into(),
        Ok(None) => StoreError::new(StoreErrorKind::NotFound(id.to_string())).into(),
        Err(e) => DatabaseError::new(DatabaseErrorKind::Query(e.to_string())).into(),
    }
}

#[async_trait::async_trait]
impl GenerationStore for PostgresGenerationStore {
    #[instrument(skip(self), fields(tenant = %tenant, %id))]
    async fn get(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Option<Generation>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<Option<Generation>> {
            use crate::schema::generations::dsl;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            let row: Option<GenerationRow> = dsl::generations
                .filter(dsl::id.eq(id.as_uuid()))
                .filter(dsl::tenant_id.eq(tenant.as_uuid()))
                .first(&mut conn)
                .optional()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

            row.map(Generation::try_from).transpose()
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }

    #[instrument(skip(self), fields(tenant = %tenant, %id))]
    async fn find_referencing(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Vec<Generation>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<Vec<Generation>> {
            use crate::schema::generations::dsl;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            // Cheap textual pre-filter in SQL; exact reference matching is
            // confirmed against the parsed records below
            let pattern = format!("%{id}%");
            let rows: Vec<GenerationRow> = dsl::generations
                .filter(dsl::tenant_id.eq(tenant.as_uuid()))
                .filter(sql::<Bool>("input_params::text LIKE ").bind::<Text, _>(pattern))
                .order((dsl::created_at.asc(), dsl::id.asc()))
                .load(&mut conn)
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

            let mut matches = Vec::with_capacity(rows.len());
            for row in rows {
                let generation = Generation::try_from(row)?;
                if generation
                    .references()
                    .iter()
                    .any(|input_ref| input_ref.id == id)
                {
                    matches.push(generation);
                }
            }
            Ok(matches)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }

    #[instrument(skip(self, generation), fields(id = %generation.id, tenant = %generation.tenant_id))]
    async fn create(&self, generation: Generation) -> AtelierResult<()> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<()> {
            use crate::schema::generations;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            diesel::insert_into(generations::table)
                .values(&NewGenerationRow::from(&generation))
                .execute(&mut conn)
                .map_err(|e| -> AtelierError {
                    match e {
                        diesel::result::Error::DatabaseError(
                            diesel::result::DatabaseErrorKind::UniqueViolation,
                            _,
                        ) => StoreError::new(StoreErrorKind::DuplicateId(
                            generation.id.to_string(),
                        ))
                        .into(),
                        other => {
                            DatabaseError::new(DatabaseErrorKind::Query(other.to_string())).into()
                        }
                    }
                })?;

            debug!(
                id = %generation.id,
                tenant = %generation.tenant_id,
                generator = %generation.generator,
                "Created generation record"
            );
            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }

    #[instrument(skip(self, output), fields(tenant = %tenant, %id))]
    async fn complete(
        &self,
        tenant: TenantId,
        id: GenerationId,
        output: GenerationOutput,
    ) -> AtelierResult<()> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<()> {
            use crate::schema::generations::dsl;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;
            let active = [
                GenerationStatus::Pending.as_str(),
                GenerationStatus::Processing.as_str(),
            ];

            let updated = diesel::update(
                dsl::generations
                    .filter(dsl::id.eq(id.as_uuid()))
                    .filter(dsl::tenant_id.eq(tenant.as_uuid()))
                    .filter(dsl::status.eq_any(active)),
            )
            .set((
                dsl::status.eq(GenerationStatus::Completed.as_str()),
                dsl::storage_url.eq(&output.storage_url),
                dsl::width.eq(output.width.map(|w| w as i32)),
                dsl::height.eq(output.height.map(|h| h as i32)),
                dsl::duration_secs.eq(output.duration_secs),
                dsl::format.eq(&output.format),
                dsl::content.eq(&output.content),
            ))
            .execute(&mut conn)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

            if updated == 0 {
                return Err(transition_failure(
                    &mut conn,
                    tenant,
                    id,
                    GenerationStatus::Completed,
                ));
            }
            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }

    #[instrument(skip(self), fields(tenant = %tenant, %id, status = status.as_str()))]
    async fn set_status(
        &self,
        tenant: TenantId,
        id: GenerationId,
        status: GenerationStatus,
    ) -> AtelierResult<()> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<()> {
            use crate::schema::generations::dsl;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            // Completion goes through `complete` so output metadata lands
            // with the status change
            if status == GenerationStatus::Completed {
                return Err(transition_failure(&mut conn, tenant, id, status));
            }

            let active = [
                GenerationStatus::Pending.as_str(),
                GenerationStatus::Processing.as_str(),
            ];
            let updated = diesel::update(
                dsl::generations
                    .filter(dsl::id.eq(id.as_uuid()))
                    .filter(dsl::tenant_id.eq(tenant.as_uuid()))
                    .filter(dsl::status.eq_any(active)),
            )
            .set(dsl::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

            if updated == 0 {
                return Err(transition_failure(&mut conn, tenant, id, status));
            }
            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }

    #[instrument(skip(self), fields(tenant = %tenant, limit))]
    async fn list_recent(&self, tenant: TenantId, limit: i64) -> AtelierResult<Vec<Generation>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> AtelierResult<Vec<Generation>> {
            use crate::schema::generations::dsl;

            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Pool(e.to_string())))?;

            let rows: Vec<GenerationRow> = dsl::generations
                .filter(dsl::tenant_id.eq(tenant.as_uuid()))
                .order((dsl::created_at.desc(), dsl::id.desc()))
                .limit(limit.max(0))
                .load(&mut conn)
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

            rows.into_iter().map(Generation::try_from).collect()
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Join(e.to_string())))?
    }
}
