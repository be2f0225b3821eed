//! Storage module for uploaded files
//!
//! Files are written under a local directory and served statically under a
//! public URL path.

mod local_storage;

pub use local_storage::LocalStorage;
