pub mod auth;
pub mod catalog;
pub mod files;
pub mod tour_packages;
