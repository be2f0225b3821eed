//! Tour packages: the root entity of the catalog.
//!
//! A package holds non-owning references to a destination, hotel, armada,
//! consumption plan and (optionally) a package category. Reads resolve them
//! into [`Reference::Resolved`](crate::shared::reference::Reference) unless
//! `populate=false` is passed.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
