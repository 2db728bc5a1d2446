//! Authentication session lifecycle.
//!
//! The session is the in-memory answer to "is the user logged in, and as
//! whom". It is restored from durable storage at startup, populated by a
//! successful login and fully cleared by logout. The credential token is
//! opaque: the client stores and replays it but never parses it.
//!
//! Persistence is best-effort. A storage failure never blocks the in-memory
//! transition; it only costs the restore-after-restart convenience, and a
//! warning is logged.

use crate::models::UserProfile;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Storage key holding the opaque credential token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Whether, and as whom, the user is currently authenticated.
///
/// Modeled as an enum so the invariant that the authenticated flag, the
/// token and the user profile transition together cannot be violated: there
/// is no representable state with a token but no user.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// No user is logged in.
    #[default]
    Anonymous,

    /// A user is logged in with an opaque credential token.
    Authenticated {
        /// Profile of the logged-in user.
        user: UserProfile,
        /// Opaque credential issued by the backend, replayed verbatim.
        token: String,
    },
}

impl Session {
    /// Whether a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// The credential token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    /// The user profile, when authenticated.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// Owns the current [`Session`] and its persistence.
///
/// `login` and `logout` are the only mutators besides `restore`; each
/// replaces the whole session value in a single assignment, so consumers
/// never observe a partial state.
pub struct SessionManager {
    current: Session,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    /// Creates a manager with an anonymous session.
    ///
    /// Call [`restore`](SessionManager::restore) afterwards to pick up a
    /// session persisted by a previous process.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            current: Session::Anonymous,
            storage,
        }
    }

    /// Restores a previously persisted session, if one exists.
    ///
    /// An authenticated session is restored only when both the token and a
    /// parseable user profile are present. Anything else, including corrupt
    /// stored data or a storage read failure, is treated as "no session";
    /// this never errors.
    pub fn restore(&mut self) -> &Session {
        self.current = self.read_persisted();
        &self.current
    }

    /// Logs in as `user` with the opaque `token`.
    ///
    /// The new session takes effect immediately; both values are persisted
    /// best-effort for the next process start.
    pub fn login(&mut self, user: UserProfile, token: impl Into<String>) -> &Session {
        let token = token.into();
        self.persist(&user, &token);
        self.current = Session::Authenticated { user, token };
        &self.current
    }

    /// Logs out, clearing the session and its persisted form.
    ///
    /// Idempotent: logging out with no persisted session succeeds.
    pub fn logout(&mut self) -> &Session {
        if let Err(err) = self.storage.remove(TOKEN_KEY) {
            log::warn!("Could not remove persisted token: {}", err);
        }
        if let Err(err) = self.storage.remove(USER_KEY) {
            log::warn!("Could not remove persisted user: {}", err);
        }
        self.current = Session::Anonymous;
        &self.current
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.current
    }

    /// Shorthand for `session().is_authenticated()`.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_authenticated()
    }

    fn read_persisted(&self) -> Session {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => return Session::Anonymous,
            Err(err) => {
                log::warn!("Could not read persisted token: {}", err);
                return Session::Anonymous;
            }
        };

        let raw_user = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Session::Anonymous,
            Err(err) => {
                log::warn!("Could not read persisted user: {}", err);
                return Session::Anonymous;
            }
        };

        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => Session::Authenticated { user, token },
            Err(err) => {
                log::warn!("Discarding corrupt persisted user profile: {}", err);
                Session::Anonymous
            }
        }
    }

    fn persist(&self, user: &UserProfile, token: &str) {
        if let Err(err) = self.storage.set(TOKEN_KEY, token) {
            log::warn!("Could not persist token: {}", err);
            return;
        }
        match serde_json::to_string(user) {
            Ok(serialized) => {
                if let Err(err) = self.storage.set(USER_KEY, &serialized) {
                    log::warn!("Could not persist user profile: {}", err);
                }
            }
            Err(err) => log::warn!("Could not serialize user profile: {}", err),
        }
    }
}
