//! Core data models shared across the crate.
//!
//! These are the records exchanged with the external collaborators: the
//! geolocation result returned by lookups and the user profile issued by the
//! credential backend. Both are treated as opaque pass-through data: the
//! core displays them but never interprets their contents.

pub mod location;
pub mod user;

pub use location::GeoLocation;
pub use user::UserProfile;
