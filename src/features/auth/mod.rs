//! Bearer-token authentication.
//!
//! Tokens are issued elsewhere and signed with the shared `JWT_SECRET`. The
//! auth middleware attaches an [`model::AuthenticatedUser`] per request; write
//! handlers demand one through [`guards::RequireAdmin`].

mod validator;

pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;

pub use validator::JwtValidator;
