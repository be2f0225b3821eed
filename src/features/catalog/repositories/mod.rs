//! Persistence seam for catalog entities.
//!
//! One generic repository serves all five kinds; the SQL is derived from
//! [`CatalogEntity`]'s table and column list.

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgCatalogRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalog::models::CatalogEntity;

#[async_trait]
pub trait CatalogRepository<T: CatalogEntity>: Send + Sync {
    async fn insert(&self, input: T::Input) -> Result<T>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>>;

    /// Entities whose id is in `ids`; unknown ids are skipped
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<T>>;

    /// All entities, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace the writable fields; `None` when the id does not exist
    async fn update(&self, id: Uuid, input: T::Input) -> Result<Option<T>>;

    /// `false` when the id does not exist
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
