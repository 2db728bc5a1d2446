//! IP location tracker client.
//!
//! Lets an authenticated user view their current network-derived location
//! and look up the location of arbitrary IP addresses, keeping a bounded
//! local history of past lookups with per-address privacy masking.
//!
//! # Architecture
//!
//! The crate is organized into several modules, leaves first:
//!
//! - **storage**: durable string-keyed slots behind the [`storage::KeyValueStore`]
//!   trait (file-backed and in-memory implementations)
//! - **models**: opaque collaborator records (geolocation results, user
//!   profiles)
//! - **visibility**: the masking utility and the per-IP reveal registry
//! - **history**: the capped, ordered lookup history and its selection set
//! - **session**: the authentication lifecycle and its persistence
//! - **client**: HTTP clients for the two external collaborators (the
//!   credential backend and the geolocation provider)
//! - **config**: settings schema and global accessor
//! - **app**: the facade wiring everything together, plus the route guard
//!
//! # External collaborators
//!
//! The backend is an opaque credential-issuing service: it receives an
//! email/password pair and returns a user profile plus a token that is
//! stored and replayed but never parsed. The geolocation provider is an
//! opaque lookup function from an IP address to a location record. Both are
//! reached over HTTP; every failure is converted into the
//! [`client::ClientError`] taxonomy at the boundary.
//!
//! # State and persistence
//!
//! Three independent storage keys survive a restart: the credential token,
//! the serialized user profile and the serialized history list. All reads
//! fail open, so corrupt or missing data degrades to "no session" or "no
//! history" instead of an error. The visibility registry is deliberately
//! transient and resets each process start.
//!
//! # Usage
//!
//! ```no_run
//! use iptrack::app::App;
//! use iptrack::config::TrackerConfig;
//! use iptrack::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrackerConfig::default();
//! let mut app = App::new(&config, Arc::new(MemoryStore::new()))?;
//!
//! app.login("ada@example.com", "secret").await?;
//! let entry = app.search("8.8.8.8").await?;
//! println!("{} -> {:?}", app.display_ip(&entry.ip), entry.location.city);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod history;
pub mod models;
pub mod session;
pub mod storage;
pub mod visibility;
