mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgTourPackageRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalog::models::CatalogKind;
use crate::features::tour_packages::models::{NewTourPackage, TourPackage, TourPackageFilter};

#[async_trait]
pub trait TourPackageRepository: Send + Sync {
    async fn insert(&self, package: NewTourPackage) -> Result<TourPackage>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TourPackage>>;

    /// Matching packages, newest first
    async fn list(&self, filter: &TourPackageFilter) -> Result<Vec<TourPackage>>;

    /// `None` when the id does not exist
    async fn update(&self, id: Uuid, package: NewTourPackage) -> Result<Option<TourPackage>>;

    /// `false` when the id does not exist
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Number of packages pointing at catalog entity `id` of `kind`
    async fn count_referencing(&self, kind: CatalogKind, id: Uuid) -> Result<i64>;
}
