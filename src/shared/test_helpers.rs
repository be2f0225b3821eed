//! Fixtures shared by the in-crate tests: token issuing, memory-backed
//! services and seeded catalog data.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{NaiveDate, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::app::{api_routes, AppServices};
use crate::features::auth::model::Claims;
use crate::features::auth::JwtValidator;
use crate::features::catalog::dtos::{
    ArmadaInput, ConsumptionInput, DestinationInput, HotelInput, PackageCategoryInput,
};
use crate::features::catalog::models::{Armada, Consumption, Destination, Hotel, PackageCategory};
use crate::features::catalog::repositories::memory::InMemoryCatalogRepository;
use crate::features::catalog::repositories::CatalogRepository;
use crate::features::catalog::services::CatalogService;
use crate::features::tour_packages::dtos::CreateTourPackageDto;
use crate::features::tour_packages::models::{Schedule, ScheduleStatus};
use crate::features::tour_packages::repositories::memory::InMemoryTourPackageRepository;
use crate::features::tour_packages::repositories::TourPackageRepository;
use crate::features::tour_packages::services::{CatalogRepositories, TourPackageService};
use crate::modules::storage::LocalStorage;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-at-least-32-characters";
pub const TEST_ISSUER: &str = "travel-agency-test";

/// Sign an HS256 token; a negative `ttl_secs` yields an already expired one
pub fn issue_token(secret: &str, issuer: &str, sub: &str, roles: &[&str], ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iss: issuer.to_string(),
        iat: now as u64,
        exp: (now + ttl_secs).max(0) as u64,
        name: None,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    issue_token(TEST_JWT_SECRET, TEST_ISSUER, "admin-1", &["admin"], 3600)
}

pub fn customer_token() -> String {
    issue_token(TEST_JWT_SECRET, TEST_ISSUER, "customer-1", &["customer"], 3600)
}

pub fn test_validator() -> Arc<JwtValidator> {
    Arc::new(JwtValidator::new(
        TEST_JWT_SECRET,
        TEST_ISSUER,
        Duration::from_secs(0),
    ))
}

/// Storage rooted in a fresh directory under the system temp dir
pub fn temp_storage() -> LocalStorage {
    LocalStorage::new(
        std::env::temp_dir().join(format!("travel-agency-uploads-{}", Uuid::now_v7())),
        "/uploads",
    )
}

/// Ids of one seeded entity per catalog kind
#[derive(Debug, Clone, Copy)]
pub struct SeededReferences {
    pub destination: Uuid,
    pub hotel: Uuid,
    pub armada: Uuid,
    pub consume: Uuid,
    pub kategori: Uuid,
}

impl SeededReferences {
    /// The "Bali Adventure" package pointing at the seeded entities
    pub fn bali_adventure(&self) -> CreateTourPackageDto {
        CreateTourPackageDto {
            nama: "Bali Adventure".to_string(),
            deskripsi: "Explore the beauty of Bali".to_string(),
            durasi: "3 days".to_string(),
            include: vec!["Hotel".to_string(), "Transport".to_string()],
            exclude: vec!["Flights".to_string()],
            jadwal: vec![Schedule {
                start_date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2023, 8, 3).unwrap(),
                status: ScheduleStatus::Available,
            }],
            status: None,
            harga: 1_500_000,
            destination: self.destination,
            hotel: self.hotel,
            armada: self.armada,
            consume: self.consume,
            kategori: Some(self.kategori),
        }
    }
}

/// Memory-backed repositories and the services built over them
pub struct TestCatalog {
    pub packages: Arc<InMemoryTourPackageRepository>,
    pub destinations: Arc<InMemoryCatalogRepository<Destination>>,
    pub hotels: Arc<InMemoryCatalogRepository<Hotel>>,
    pub armadas: Arc<InMemoryCatalogRepository<Armada>>,
    pub consumptions: Arc<InMemoryCatalogRepository<Consumption>>,
    pub categories: Arc<InMemoryCatalogRepository<PackageCategory>>,
    pub storage: Arc<LocalStorage>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            packages: Arc::default(),
            destinations: Arc::default(),
            hotels: Arc::default(),
            armadas: Arc::default(),
            consumptions: Arc::default(),
            categories: Arc::default(),
            storage: Arc::new(temp_storage()),
        }
    }

    fn package_repo(&self) -> Arc<dyn TourPackageRepository> {
        self.packages.clone()
    }

    pub fn repositories(&self) -> CatalogRepositories {
        CatalogRepositories {
            destinations: self.destinations.clone(),
            hotels: self.hotels.clone(),
            armadas: self.armadas.clone(),
            consumptions: self.consumptions.clone(),
            categories: self.categories.clone(),
        }
    }

    pub fn services(&self) -> AppServices {
        AppServices::new(
            self.package_repo(),
            self.repositories(),
            self.storage.clone(),
            1024 * 1024,
            test_validator(),
        )
    }

    /// API routes behind the real auth middleware
    pub fn router(&self) -> Router {
        api_routes(&self.services())
    }

    pub fn package_service(&self) -> TourPackageService {
        TourPackageService::new(self.package_repo(), self.repositories())
    }

    pub fn hotel_service(&self) -> CatalogService<Hotel> {
        CatalogService::<Hotel>::new(self.hotels.clone(), self.package_repo())
    }

    pub fn armada_service(&self) -> CatalogService<Armada> {
        CatalogService::<Armada>::new(self.armadas.clone(), self.package_repo())
    }

    pub async fn seed_references(&self) -> SeededReferences {
        let destination = self
            .destinations
            .insert(DestinationInput {
                nama: "Bali".to_string(),
                lokasi: "Indonesia".to_string(),
                deskripsi: Sentence(3..8).fake(),
                foto: None,
            })
            .await
            .unwrap();
        let hotel = self
            .hotels
            .insert(HotelInput {
                nama: "Hotel Santika".to_string(),
                alamat: "Jl. Raya Kuta".to_string(),
                bintang: 4,
                deskripsi: Some(Sentence(3..8).fake()),
                foto: None,
            })
            .await
            .unwrap();
        let armada = self
            .armadas
            .insert(ArmadaInput {
                nama: "Hiace Premio".to_string(),
                kapasitas: 14,
                deskripsi: None,
                foto: None,
            })
            .await
            .unwrap();
        let consume = self
            .consumptions
            .insert(ConsumptionInput {
                nama: "Full board".to_string(),
                deskripsi: None,
            })
            .await
            .unwrap();
        let kategori = self
            .categories
            .insert(PackageCategoryInput {
                nama: "Adventure".to_string(),
                deskripsi: None,
            })
            .await
            .unwrap();

        SeededReferences {
            destination: destination.id,
            hotel: hotel.id,
            armada: armada.id,
            consume: consume.id,
            kategori: kategori.id,
        }
    }

    /// Store a package named `nama` directly, bypassing the service
    pub async fn seed_package(&self, refs: &SeededReferences, nama: &str) -> Uuid {
        let dto = CreateTourPackageDto {
            nama: nama.to_string(),
            ..refs.bali_adventure()
        };
        self.packages.insert(dto.into()).await.unwrap().id
    }
}

/// Serve `router` on an ephemeral loopback port; returns its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
