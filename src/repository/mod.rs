//! Persistence gateway: one repository per resource, behind a trait so handlers never see the pool.

mod pg;

pub use pg::PgRepository;

use crate::error::AppError;
use crate::models::Resource;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// All rows of the resource, unpaginated.
    async fn list(&self) -> Result<Vec<R>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<R>, AppError>;

    /// Insert one row; the key is assigned by the store. Returns the stored row.
    async fn insert(&self, input: &R::Input) -> Result<R, AppError>;

    /// Overwrite every non-key column of row `id`. `None` when the row does not exist.
    async fn update(&self, id: i64, input: &R::Input) -> Result<Option<R>, AppError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
