mod tour_package_dto;

pub use tour_package_dto::*;
