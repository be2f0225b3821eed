//! Travel agency back end: tour packages, the catalog they reference, image
//! uploads, and a typed client with form handling for the package workflow.

pub mod app;
pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
