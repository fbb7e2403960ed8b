//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionSignalExt, SessionStore};

/// Redirect to `/login` whenever the session has been hydrated and holds no token.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionStore>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if session.should_redirect_to_login() {
            navigate("/login", NavigateOptions::default());
        }
    });
}
