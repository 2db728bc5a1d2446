//! Application facade.
//!
//! Wires the core components together with explicit dependency injection:
//! one [`App`] is constructed at process start from a configuration and a
//! storage handle, and every consumer goes through it. Each user action
//! mutates exactly one component; reads combine derived state from all of
//! them.

pub mod guard;

pub use guard::{resolve as guard_route, Access, Route};

use crate::client::{ClientError, CredentialClient, GeoClient};
use crate::config::TrackerConfig;
use crate::history::{HistoryEntry, HistoryStore, SelectionSet};
use crate::models::GeoLocation;
use crate::session::{Session, SessionManager};
use crate::storage::KeyValueStore;
use crate::visibility::VisibilityRegistry;
use std::sync::Arc;

/// Handle identifying one in-flight lookup.
///
/// Issued by [`App::begin_lookup`]; a completed lookup whose ticket has been
/// superseded by a newer one is discarded instead of appended, so a slow
/// stale response can never overwrite the result of a newer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
}

/// The application core: session, history, visibility and the collaborator
/// clients behind one facade.
pub struct App {
    session: SessionManager,
    history: HistoryStore,
    visibility: VisibilityRegistry,
    selection: SelectionSet,
    credentials: CredentialClient,
    geo: GeoClient,
    lookup_generation: u64,
}

impl App {
    /// Builds the application from a configuration and a storage handle.
    ///
    /// Restores any persisted session and loads the persisted history; both
    /// fail open, so construction only errors when an HTTP client cannot be
    /// built.
    pub fn new(
        config: &TrackerConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let timeout = config.timeout_duration();
        let credentials = CredentialClient::new(&config.api_base_url, timeout)?;
        let geo = GeoClient::new(&config.geo_base_url, timeout)?;

        let mut session = SessionManager::new(Arc::clone(&storage));
        session.restore();
        let history = HistoryStore::load(storage);

        Ok(Self {
            session,
            history,
            visibility: VisibilityRegistry::new(),
            selection: SelectionSet::new(),
            credentials,
            geo,
            lookup_generation: 0,
        })
    }

    // --- Session ---

    /// Logs in against the credential backend.
    ///
    /// On success the session transitions and persists; on any failure the
    /// session is left untouched and the error carries the user-visible
    /// message.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, ClientError> {
        let success = self.credentials.login(email, password).await?;
        Ok(self.session.login(success.user, success.token))
    }

    /// Logs out and clears the persisted session.
    pub fn logout(&mut self) -> &Session {
        self.session.logout()
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        self.session.session()
    }

    /// Resolves whether `route` may render for the current session.
    pub fn guard(&self, route: Route) -> Access {
        guard_route(route, self.session.is_authenticated())
    }

    // --- Lookups ---

    /// The caller's own network-derived location. Not recorded in history.
    pub async fn current_location(&self) -> Result<GeoLocation, ClientError> {
        self.geo.current().await
    }

    /// Looks up `ip` and records the result in history.
    ///
    /// Append-or-nothing: any lookup failure leaves the history untouched.
    /// Empty input is rejected locally without a collaborator call.
    pub async fn search(&mut self, ip: &str) -> Result<HistoryEntry, ClientError> {
        let ip = ip.trim();
        if ip.is_empty() {
            return Err(ClientError::Lookup("No IP address provided".to_string()));
        }

        let ticket = self.begin_lookup();
        let location = self.geo.lookup(ip).await?;

        match self.complete_lookup(ticket, ip, location) {
            Some(entry) => Ok(entry),
            // Unreachable through this sequential path, but a concurrent
            // driver interleaving begin/complete can supersede a lookup.
            None => Err(ClientError::Lookup("Lookup superseded".to_string())),
        }
    }

    /// Starts a lookup, superseding any still in flight.
    pub fn begin_lookup(&mut self) -> LookupTicket {
        self.lookup_generation += 1;
        LookupTicket {
            generation: self.lookup_generation,
        }
    }

    /// Records a finished lookup, unless its ticket has been superseded.
    ///
    /// Returns the appended entry, or `None` when the result was stale and
    /// discarded.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        ip: &str,
        location: GeoLocation,
    ) -> Option<HistoryEntry> {
        if ticket.generation != self.lookup_generation {
            log::debug!("Discarding stale lookup result for {}", ip);
            return None;
        }
        Some(self.history.append(ip, location))
    }

    // --- History ---

    /// The lookup history, most recent first.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Re-surfaces a past lookup from the cache, without a new collaborator
    /// call.
    pub fn recall(&self, id: i64) -> Option<&HistoryEntry> {
        self.history.get(id)
    }

    /// Flips whether the entry with `id` is selected for deletion.
    pub fn toggle_selected(&mut self, id: i64) {
        self.selection.toggle(id);
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Deletes every selected entry, then clears the selection.
    ///
    /// Returns the number of entries removed.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.history.delete_by_ids(self.selection.ids());
        self.selection.clear();
        removed
    }

    // --- Visibility ---

    /// Flips whether `ip` is displayed unmasked.
    pub fn toggle_visibility(&mut self, ip: &str) {
        self.visibility.toggle(ip);
    }

    /// Whether `ip` is currently displayed unmasked.
    pub fn is_revealed(&self, ip: &str) -> bool {
        self.visibility.is_revealed(ip)
    }

    /// The display form of `ip` under the current visibility state.
    pub fn display_ip(&self, ip: &str) -> String {
        self.visibility.display(ip)
    }
}
