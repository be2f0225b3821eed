mod tour_package_service;

pub use tour_package_service::{CatalogRepositories, TourPackageService};
