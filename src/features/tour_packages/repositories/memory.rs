use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TourPackageRepository;
use crate::core::error::Result;
use crate::features::catalog::models::CatalogKind;
use crate::features::tour_packages::models::{NewTourPackage, TourPackage, TourPackageFilter};

/// Map-backed repository used by tests
#[derive(Default)]
pub struct InMemoryTourPackageRepository {
    items: RwLock<BTreeMap<Uuid, TourPackage>>,
}

#[async_trait]
impl TourPackageRepository for InMemoryTourPackageRepository {
    async fn insert(&self, package: NewTourPackage) -> Result<TourPackage> {
        let package = TourPackage::from_new(Uuid::now_v7(), package, Utc::now());
        self.items.write().await.insert(package.id, package.clone());
        Ok(package)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TourPackage>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &TourPackageFilter) -> Result<Vec<TourPackage>> {
        // v7 keys sort by creation time
        Ok(self
            .items
            .read()
            .await
            .values()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, package: NewTourPackage) -> Result<Option<TourPackage>> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&id).map(|stored| {
            let created_at = stored.created_at;
            *stored = TourPackage::from_new(id, package, Utc::now());
            stored.created_at = created_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn count_referencing(&self, kind: CatalogKind, id: Uuid) -> Result<i64> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .filter(|p| p.reference(kind) == Some(id))
            .count() as i64)
    }
}
