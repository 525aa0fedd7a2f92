//! Session state and its lifecycle: hydrate-and-verify at startup, `login`
//! and `logout` mutators, and the authenticated flag the route guard reads.
//!
//! Invariant: the user is present if and only if a valid access token is.
//! `apply_login` and `apply_logout` each write the store first and the
//! in-memory state immediately after, in one synchronous block, so no reader
//! ever observes a half-updated session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::token_store::TokenStore;
use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// The state the app boots with: nothing known yet, hydration pending.
    #[must_use]
    pub fn startup() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Persist the session and mark the user logged in.
pub fn apply_login(
    state: &mut AuthState,
    store: &dyn TokenStore,
    access_token: &str,
    refresh_token: Option<&str>,
    user: User,
) {
    store.save(access_token, refresh_token, &user);
    state.user = Some(user);
}

/// Clear the persisted session and mark the user logged out.
pub fn apply_logout(state: &mut AuthState, store: &dyn TokenStore) {
    store.clear();
    state.user = None;
}

/// Outcome of startup hydration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartupSession {
    Authenticated(User),
    Unauthenticated,
}

/// Resolve the session once at application start.
///
/// When the store holds both an access token and a cached user, the token is
/// verified against the backend; an expired token is refreshed transparently
/// by the request layer on the way. Any unrecoverable failure resolves
/// `Unauthenticated` with the store cleared. This function never fails, so
/// the caller can unconditionally finish loading when it returns.
pub async fn resolve_startup_session(api: &ApiClient, store: &dyn TokenStore) -> StartupSession {
    let stored = store.load();
    let (Some(_), Some(user)) = (stored.access_token, stored.user) else {
        return StartupSession::Unauthenticated;
    };

    match api::verify(api).await {
        Ok(true) => StartupSession::Authenticated(user),
        Ok(false) | Err(_) => {
            store.clear();
            StartupSession::Unauthenticated
        }
    }
}
