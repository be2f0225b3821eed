//! Modules layer - Infrastructure components behind the features
//!
//! Contains adapters for resources outside the database, like file storage.

pub mod storage;
