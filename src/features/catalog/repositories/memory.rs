use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogRepository;
use crate::core::error::Result;
use crate::features::catalog::models::CatalogEntity;
use crate::shared::reference::Identified;

/// Map-backed repository used by tests. UUID v7 keys keep insertion order.
pub struct InMemoryCatalogRepository<T> {
    items: RwLock<BTreeMap<Uuid, T>>,
}

impl<T> Default for InMemoryCatalogRepository<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl<T: CatalogEntity> CatalogRepository<T> for InMemoryCatalogRepository<T> {
    async fn insert(&self, input: T::Input) -> Result<T> {
        let entity = T::from_input(Uuid::now_v7(), input, Utc::now());
        self.items.write().await.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<T>> {
        let items = self.items.read().await;
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, input: T::Input) -> Result<Option<T>> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&id).map(|entity| {
            entity.apply_input(input, Utc::now());
            entity.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}
