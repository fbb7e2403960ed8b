//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single source of truth for "is someone logged in".
//! The app provides it through Leptos context as `RwSignal<SessionStore>`;
//! route guards read it, the login page writes it, and the API client reads
//! the bearer token from it through `TokenSource`.
//!
//! LIFECYCLE
//! =========
//! Empty at start, optionally hydrated from storage, then mutated only by
//! `set_session` and `clear_session`. Each mutation assigns a whole new
//! `Session`, so observers never see a token without its profile.
//!
//! ERROR HANDLING
//! ==============
//! Persistence is best-effort: storage failures are logged as warnings and the
//! in-memory session is still updated.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, RwLock};

use leptos::prelude::{RwSignal, With, WithUntracked};

use crate::net::types::UserProfile;
use crate::util::storage::{MemoryStorage, SharedStorage, TOKEN_KEY, USER_KEY};

/// Current authenticated identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    /// Whether this session was written to durable storage.
    pub persisted: bool,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("access token must not be empty")]
    EmptyToken,
}

/// Owner of the `Session` and of the storage it persists to.
#[derive(Clone)]
pub struct SessionStore {
    session: Session,
    storage: SharedStorage,
    hydrated: bool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("hydrated", &self.hydrated)
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::empty(MemoryStorage::shared())
    }
}

impl SessionStore {
    /// An empty store that has not looked at storage yet.
    ///
    /// Used for the first (server-matching) render before the browser
    /// hydrates the real session.
    #[must_use]
    pub fn empty(storage: SharedStorage) -> Self {
        Self {
            session: Session::default(),
            storage,
            hydrated: false,
        }
    }

    /// Build a store from whatever a previous persisted session left behind.
    ///
    /// Missing or malformed data yields an empty session; this never fails.
    #[must_use]
    pub fn hydrate(storage: SharedStorage) -> Self {
        let session = read_persisted(&storage).unwrap_or_default();
        Self {
            session,
            storage,
            hydrated: true,
        }
    }

    /// Whether `hydrate` has run, i.e. an empty session really means "logged out".
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Replace the current session.
    ///
    /// With `persist`, the token and profile are written to storage so a reload
    /// keeps the user logged in. Without it, any previously persisted session is
    /// erased so a reload starts logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyToken` for an empty token; the current
    /// session is left untouched in that case.
    pub fn set_session(&mut self, token: &str, user: UserProfile, persist: bool) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let persisted = if persist {
            self.write_persisted(token, &user)
        } else {
            self.remove_persisted();
            false
        };

        self.session = Session {
            token: Some(token.to_owned()),
            user: Some(user),
            persisted,
        };
        self.hydrated = true;
        Ok(())
    }

    /// Forget the session in memory and in storage. Safe to call repeatedly.
    pub fn clear_session(&mut self) {
        self.remove_persisted();
        self.session = Session::default();
        self.hydrated = true;
    }

    fn write_persisted(&self, token: &str, user: &UserProfile) -> bool {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                leptos::logging::warn!("session not persisted: profile serialization failed: {e}");
                return false;
            }
        };
        let written = self
            .storage
            .set(TOKEN_KEY, token)
            .and_then(|()| self.storage.set(USER_KEY, &user_json));
        match written {
            Ok(()) => true,
            Err(e) => {
                leptos::logging::warn!("session not persisted: {e}");
                // Never leave a token behind without its profile.
                let _ = self.storage.remove(TOKEN_KEY);
                false
            }
        }
    }

    fn remove_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                leptos::logging::warn!("failed to erase persisted session: {e}");
            }
        }
    }
}

fn read_persisted(storage: &SharedStorage) -> Option<Session> {
    let token = match storage.get(TOKEN_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return None,
        Err(e) => {
            leptos::logging::warn!("persisted session unreadable: {e}");
            return None;
        }
    };

    let user = match storage.get(USER_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Option<UserProfile>>(&raw) {
            Ok(user) => user,
            Err(e) => {
                leptos::logging::warn!("discarding persisted session with malformed profile: {e}");
                return None;
            }
        },
        Ok(None) => None,
        Err(e) => {
            leptos::logging::warn!("persisted session unreadable: {e}");
            return None;
        }
    };

    Some(Session {
        token: Some(token),
        user,
        persisted: true,
    })
}

/// Read-only access to the current bearer token.
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        self.session.token.clone()
    }
}

impl TokenSource for Arc<RwLock<SessionStore>> {
    fn token(&self) -> Option<String> {
        self.read().ok().and_then(|store| store.session.token.clone())
    }
}

impl TokenSource for RwSignal<SessionStore> {
    fn token(&self) -> Option<String> {
        self.try_with_untracked(|store| store.session.token.clone())
            .flatten()
    }
}

/// Reactive helpers for components holding the session signal.
pub trait SessionSignalExt {
    /// Tracked read: whether the guard should send the user to `/login`.
    fn should_redirect_to_login(&self) -> bool;
}

impl SessionSignalExt for RwSignal<SessionStore> {
    fn should_redirect_to_login(&self) -> bool {
        self.with(should_redirect_unauth)
    }
}

/// True once the real session is known and it has no token.
#[must_use]
pub fn should_redirect_unauth(store: &SessionStore) -> bool {
    store.is_hydrated() && !store.is_authenticated()
}
