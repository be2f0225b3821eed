use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::catalog::models::CatalogEntity;
use crate::features::catalog::repositories::CatalogRepository;
use crate::features::tour_packages::repositories::TourPackageRepository;

/// CRUD for one catalog kind
pub struct CatalogService<T: CatalogEntity> {
    repo: Arc<dyn CatalogRepository<T>>,
    packages: Arc<dyn TourPackageRepository>,
}

impl<T: CatalogEntity> CatalogService<T> {
    pub fn new(repo: Arc<dyn CatalogRepository<T>>, packages: Arc<dyn TourPackageRepository>) -> Self {
        Self { repo, packages }
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("{} '{}' not found", T::KIND.label(), id))
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<T> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    pub async fn create(&self, input: T::Input) -> Result<T> {
        input.validate()?;

        let entity = self.repo.insert(input).await?;
        tracing::info!("{} created: id={}", T::KIND.label(), entity.id());

        Ok(entity)
    }

    pub async fn update(&self, id: Uuid, input: T::Input) -> Result<T> {
        input.validate()?;

        let entity = self
            .repo
            .update(id, input)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!("{} updated: id={}", T::KIND.label(), id);

        Ok(entity)
    }

    /// Delete an entity no package references.
    ///
    /// Packages hold non-owning references; deleting a referenced entity is
    /// refused with `Conflict` instead of cascading or leaving dangling ids.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let referencing = self.packages.count_referencing(T::KIND, id).await?;
        if referencing > 0 {
            return Err(AppError::Conflict(format!(
                "{} '{}' is still used by {} tour package(s)",
                T::KIND.label(),
                id,
                referencing
            )));
        }

        if !self.repo.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!("{} deleted: id={}", T::KIND.label(), id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::dtos::{ArmadaInput, HotelInput};
    use crate::features::catalog::models::{Armada, Hotel};
    use crate::shared::test_helpers::TestCatalog;

    fn hotel_input(nama: &str) -> HotelInput {
        HotelInput {
            nama: nama.to_string(),
            alamat: "Jl. Legian No. 1".to_string(),
            bintang: 4,
            deskripsi: None,
            foto: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let catalog = TestCatalog::new();
        let service = catalog.hotel_service();

        let hotel = service.create(hotel_input("  Hotel Santika ")).await.unwrap();
        let fetched: Hotel = service.get(hotel.id).await.unwrap();

        assert_eq!(fetched.nama, "Hotel Santika");
        assert_eq!(fetched, hotel);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let catalog = TestCatalog::new();
        let service = catalog.armada_service();

        let err = service
            .create(ArmadaInput {
                nama: "".to_string(),
                kapasitas: 0,
                deskripsi: None,
                foto: None,
            })
            .await
            .unwrap_err();

        match err {
            AppError::InvalidFields(fields) => {
                assert!(fields.contains_key("nama"));
                assert!(fields.contains_key("kapasitas"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let catalog = TestCatalog::new();
        let service = catalog.hotel_service();

        let err = service
            .update(Uuid::now_v7(), hotel_input("Hotel Baru"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let catalog = TestCatalog::new();
        let service = catalog.armada_service();

        let err = service.delete(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_referenced_entity_is_conflict() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        catalog.seed_package(&refs, "Bali Adventure").await;

        let err = catalog.hotel_service().delete(refs.hotel).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // still there
        let hotel: Hotel = catalog.hotel_service().get(refs.hotel).await.unwrap();
        assert_eq!(hotel.id, refs.hotel);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_entity() {
        let catalog = TestCatalog::new();
        let service = catalog.armada_service();
        let armada: Armada = service
            .create(ArmadaInput {
                nama: "Elf Long".to_string(),
                kapasitas: 15,
                deskripsi: None,
                foto: None,
            })
            .await
            .unwrap();

        service.delete(armada.id).await.unwrap();

        assert!(matches!(
            service.get(armada.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
