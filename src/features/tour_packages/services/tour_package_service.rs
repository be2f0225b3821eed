use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::catalog::models::{
    Armada, CatalogEntity, Consumption, Destination, Hotel, PackageCategory,
};
use crate::features::catalog::repositories::CatalogRepository;
use crate::features::tour_packages::dtos::{
    CreateTourPackageDto, ListTourPackagesQuery, ResolvedReferences, TourPackageResponseDto,
    UpdateTourPackageDto,
};
use crate::features::tour_packages::models::{TourPackage, TourPackageFilter};
use crate::features::tour_packages::repositories::TourPackageRepository;
use crate::shared::reference::Identified;
use crate::shared::validation::FieldErrors;

/// Repositories of the entities a package references
#[derive(Clone)]
pub struct CatalogRepositories {
    pub destinations: Arc<dyn CatalogRepository<Destination>>,
    pub hotels: Arc<dyn CatalogRepository<Hotel>>,
    pub armadas: Arc<dyn CatalogRepository<Armada>>,
    pub consumptions: Arc<dyn CatalogRepository<Consumption>>,
    pub categories: Arc<dyn CatalogRepository<PackageCategory>>,
}

pub struct TourPackageService {
    packages: Arc<dyn TourPackageRepository>,
    catalog: CatalogRepositories,
}

impl TourPackageService {
    pub fn new(packages: Arc<dyn TourPackageRepository>, catalog: CatalogRepositories) -> Self {
        Self { packages, catalog }
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Tour package '{}' not found", id))
    }

    pub async fn create(&self, dto: CreateTourPackageDto) -> Result<TourPackageResponseDto> {
        dto.validate()?;
        self.verify_references(&dto).await?;

        let package = self.packages.insert(dto.into()).await?;
        tracing::info!("Tour package created: id={}, nama={}", package.id, package.nama);

        self.present(package, true).await
    }

    pub async fn get(&self, id: Uuid, populate: bool) -> Result<TourPackageResponseDto> {
        let package = self
            .packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        self.present(package, populate).await
    }

    pub async fn list(&self, query: &ListTourPackagesQuery) -> Result<Vec<TourPackageResponseDto>> {
        let filter = TourPackageFilter {
            status: query.status,
            kategori: query.kategori,
        };
        let packages = self.packages.list(&filter).await?;

        if !query.populate {
            return Ok(packages
                .into_iter()
                .map(|p| TourPackageResponseDto::from_package(p, ResolvedReferences::default()))
                .collect());
        }

        self.present_many(packages).await
    }

    /// Merge `dto` into the stored package, validate the result as a full
    /// write, and persist it. Applying the same update twice is a no-op.
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateTourPackageDto,
    ) -> Result<TourPackageResponseDto> {
        let existing = self
            .packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let merged = dto.merge_into(CreateTourPackageDto::from(&existing));
        merged.validate()?;
        self.verify_references(&merged).await?;

        let package = self
            .packages
            .update(id, merged.into())
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!("Tour package updated: id={}", id);

        self.present(package, true).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.packages.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!("Tour package deleted: id={}", id);
        Ok(())
    }

    /// Every referenced id must exist; missing ones are reported on their field
    async fn verify_references(&self, dto: &CreateTourPackageDto) -> Result<()> {
        let (destination, hotel, armada, consume, kategori) = tokio::try_join!(
            self.catalog.destinations.find_by_id(dto.destination),
            self.catalog.hotels.find_by_id(dto.hotel),
            self.catalog.armadas.find_by_id(dto.armada),
            self.catalog.consumptions.find_by_id(dto.consume),
            find_optional(&self.catalog.categories, dto.kategori),
        )?;

        let mut missing = FieldErrors::new();
        let mut check = |field: &str, found: bool, id: Option<Uuid>, label: &str| {
            if let (false, Some(id)) = (found, id) {
                missing
                    .entry(field.to_string())
                    .or_default()
                    .push(format!("{} '{}' does not exist", label, id));
            }
        };
        check("destination", destination.is_some(), Some(dto.destination), Destination::KIND.label());
        check("hotel", hotel.is_some(), Some(dto.hotel), Hotel::KIND.label());
        check("armada", armada.is_some(), Some(dto.armada), Armada::KIND.label());
        check("consume", consume.is_some(), Some(dto.consume), Consumption::KIND.label());
        check("kategori", kategori.is_some(), dto.kategori, PackageCategory::KIND.label());

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(missing))
        }
    }

    async fn present(&self, package: TourPackage, populate: bool) -> Result<TourPackageResponseDto> {
        if !populate {
            return Ok(TourPackageResponseDto::from_package(
                package,
                ResolvedReferences::default(),
            ));
        }

        let (destination, hotel, armada, consume, kategori) = tokio::try_join!(
            self.catalog.destinations.find_by_id(package.destination_id),
            self.catalog.hotels.find_by_id(package.hotel_id),
            self.catalog.armadas.find_by_id(package.armada_id),
            self.catalog.consumptions.find_by_id(package.consume_id),
            find_optional(&self.catalog.categories, package.kategori_id),
        )?;

        Ok(TourPackageResponseDto::from_package(
            package,
            ResolvedReferences {
                destination,
                hotel,
                armada,
                consume,
                kategori,
            },
        ))
    }

    /// Resolve a page of packages with one batched lookup per kind
    async fn present_many(&self, packages: Vec<TourPackage>) -> Result<Vec<TourPackageResponseDto>> {
        let ids = |f: fn(&TourPackage) -> Option<Uuid>| -> Vec<Uuid> {
            packages
                .iter()
                .filter_map(f)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };
        let destination_ids = ids(|p| Some(p.destination_id));
        let hotel_ids = ids(|p| Some(p.hotel_id));
        let armada_ids = ids(|p| Some(p.armada_id));
        let consume_ids = ids(|p| Some(p.consume_id));
        let kategori_ids = ids(|p| p.kategori_id);

        let (destinations, hotels, armadas, consumptions, categories) = tokio::try_join!(
            self.catalog.destinations.find_many(&destination_ids),
            self.catalog.hotels.find_many(&hotel_ids),
            self.catalog.armadas.find_many(&armada_ids),
            self.catalog.consumptions.find_many(&consume_ids),
            self.catalog.categories.find_many(&kategori_ids),
        )?;

        let destinations = by_id(destinations);
        let hotels = by_id(hotels);
        let armadas = by_id(armadas);
        let consumptions = by_id(consumptions);
        let categories = by_id(categories);

        Ok(packages
            .into_iter()
            .map(|package| {
                let refs = ResolvedReferences {
                    destination: destinations.get(&package.destination_id).cloned(),
                    hotel: hotels.get(&package.hotel_id).cloned(),
                    armada: armadas.get(&package.armada_id).cloned(),
                    consume: consumptions.get(&package.consume_id).cloned(),
                    kategori: package
                        .kategori_id
                        .and_then(|id| categories.get(&id).cloned()),
                };
                TourPackageResponseDto::from_package(package, refs)
            })
            .collect())
    }
}

async fn find_optional<T: CatalogEntity>(
    repo: &Arc<dyn CatalogRepository<T>>,
    id: Option<Uuid>,
) -> Result<Option<T>> {
    match id {
        Some(id) => repo.find_by_id(id).await,
        None => Ok(None),
    }
}

fn by_id<T: Identified>(entities: Vec<T>) -> HashMap<Uuid, T> {
    entities.into_iter().map(|e| (e.id(), e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tour_packages::models::PackageStatus;
    use crate::shared::reference::Reference;
    use crate::shared::test_helpers::TestCatalog;

    #[tokio::test]
    async fn test_create_bali_adventure() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let dto = refs.bali_adventure();

        let created = catalog.package_service().create(dto.clone()).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.status, PackageStatus::Available);
        assert_eq!(created.nama, "Bali Adventure");
        assert_eq!(created.deskripsi, dto.deskripsi);
        assert_eq!(created.durasi, dto.durasi);
        assert_eq!(created.include, dto.include);
        assert_eq!(created.exclude, dto.exclude);
        assert_eq!(created.jadwal, dto.jadwal);
        assert_eq!(created.harga, dto.harga);
        assert!(created.bookable);
    }

    #[tokio::test]
    async fn test_create_echoes_text_as_submitted() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let dto = CreateTourPackageDto {
            nama: " Bali Adventure ".to_string(),
            deskripsi: " Explore Bali ".to_string(),
            durasi: "3 days ".to_string(),
            include: vec![" Hotel".to_string()],
            ..refs.bali_adventure()
        };

        let created = catalog.package_service().create(dto.clone()).await.unwrap();

        assert_eq!(created.nama, dto.nama);
        assert_eq!(created.deskripsi, dto.deskripsi);
        assert_eq!(created.durasi, dto.durasi);
        assert_eq!(created.include, dto.include);
    }

    #[tokio::test]
    async fn test_read_resolves_references() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let service = catalog.package_service();
        let created = service.create(refs.bali_adventure()).await.unwrap();

        let fetched = service.get(created.id, true).await.unwrap();

        assert!(fetched.destination.is_resolved());
        assert_eq!(fetched.destination.id(), refs.destination);
        assert_eq!(fetched.hotel.id(), refs.hotel);
        assert_eq!(fetched.armada.id(), refs.armada);
        assert_eq!(fetched.consume.id(), refs.consume);
        assert_eq!(fetched.kategori.as_ref().map(Reference::id), Some(refs.kategori));

        let bare = service.get(created.id, false).await.unwrap();
        assert_eq!(bare.hotel, Reference::Id(refs.hotel));
    }

    #[tokio::test]
    async fn test_unknown_reference_is_field_error() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let dto = CreateTourPackageDto {
            hotel: Uuid::now_v7(),
            ..refs.bali_adventure()
        };

        let err = catalog.package_service().create(dto).await.unwrap_err();

        match err {
            AppError::InvalidFields(fields) => {
                assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["hotel"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let service = catalog.package_service();
        let created = service.create(refs.bali_adventure()).await.unwrap();

        let update = UpdateTourPackageDto {
            harga: Some(1_750_000),
            status: Some(PackageStatus::Booked),
            ..Default::default()
        };
        let first = service.update(created.id, update.clone()).await.unwrap();
        let second = service.update(created.id, update).await.unwrap();

        assert_eq!(first.harga, 1_750_000);
        assert_eq!(first.status, PackageStatus::Booked);
        assert!(!first.bookable);
        assert_eq!(first.to_write(), second.to_write());
        assert_eq!(second.nama, created.nama);
    }

    #[tokio::test]
    async fn test_update_validates_merged_result() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let service = catalog.package_service();
        let created = service.create(refs.bali_adventure()).await.unwrap();

        let err = service
            .update(
                created.id,
                UpdateTourPackageDto {
                    nama: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidFields(ref f) if f.contains_key("nama")));
        let unchanged = service.get(created.id, false).await.unwrap();
        assert_eq!(unchanged.nama, "Bali Adventure");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let catalog = TestCatalog::new();

        let err = catalog
            .package_service()
            .update(Uuid::now_v7(), UpdateTourPackageDto::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let service = catalog.package_service();
        let created = service.create(refs.bali_adventure()).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.get(created.id, true).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            service.delete(created.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let catalog = TestCatalog::new();
        let refs = catalog.seed_references().await;
        let service = catalog.package_service();

        let older = service.create(refs.bali_adventure()).await.unwrap();
        let newer = service
            .create(CreateTourPackageDto {
                nama: "Lombok Escape".to_string(),
                status: Some(PackageStatus::Booked),
                kategori: None,
                ..refs.bali_adventure()
            })
            .await
            .unwrap();

        let all = service
            .list(&ListTourPackagesQuery {
                status: None,
                kategori: None,
                populate: true,
            })
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
        assert!(all.iter().all(|p| p.destination.is_resolved()));

        let in_category = service
            .list(&ListTourPackagesQuery {
                status: None,
                kategori: Some(refs.kategori),
                populate: false,
            })
            .await
            .unwrap();
        assert_eq!(in_category.len(), 1);
        assert_eq!(in_category[0].id, older.id);
        assert!(!in_category[0].destination.is_resolved());

        let booked = service
            .list(&ListTourPackagesQuery {
                status: Some(PackageStatus::Booked),
                kategori: None,
                populate: true,
            })
            .await
            .unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].nama, "Lombok Escape");
    }
}
