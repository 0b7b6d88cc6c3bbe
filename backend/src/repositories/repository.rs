//! Repository trait shared by every table-backed record.

use crate::error::AppError;
use sqlx::PgPool;

/// Standard CRUD surface for a table-backed record.
#[allow(async_fn_in_trait)]
pub trait Repository<T> {
    /// Target table name.
    const TABLE: &'static str;
    /// Primary key type for the record.
    type Id;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<T>, AppError>;

    /// Fails with `NotFound` when no row matches.
    async fn find_by_id(&self, db: &PgPool, id: Self::Id) -> Result<T, AppError>;

    async fn create(&self, db: &PgPool, item: &T) -> Result<T, AppError>;

    async fn update(&self, db: &PgPool, item: &T) -> Result<T, AppError>;

    /// Fails with `NotFound` when no row was removed.
    async fn delete(&self, db: &PgPool, id: Self::Id) -> Result<(), AppError>;
}
