//! HTTP clients for the external collaborators.
//!
//! The core depends on two opaque services: a credential-issuing backend
//! (login) and a geolocation provider (current location and lookup by IP).
//! Both clients are thin reqwest wrappers that translate every failure into
//! the [`ClientError`] taxonomy at the boundary, so callers mutate state
//! only after a clean success.

pub mod auth;
pub mod error;
pub mod geo;

pub use auth::{CredentialClient, LoginSuccess};
pub use error::ClientError;
pub use geo::GeoClient;
