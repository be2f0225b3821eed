//! Catalog of entities a tour package references.
//!
//! | Kind              | Path                       |
//! |-------------------|----------------------------|
//! | Destination       | `/api/destinations`        |
//! | Hotel             | `/api/hotels`              |
//! | Armada            | `/api/armadas`             |
//! | Consumption       | `/api/consumptions`        |
//! | Package category  | `/api/package-categories`  |
//!
//! Each path serves `GET`/`POST` on the collection and `GET`/`PUT`/`DELETE`
//! on `/{id}`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
