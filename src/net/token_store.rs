//! Token Store: passive persistence for the session credentials.
//!
//! Three keyed entries (`accessToken`, `refreshToken`, `user`) backed by
//! `localStorage` in the browser. Missing keys load as `None`; nothing here
//! validates or talks to the network.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use crate::net::types::User;

#[cfg(feature = "csr")]
const ACCESS_TOKEN_KEY: &str = "accessToken";
#[cfg(feature = "csr")]
const REFRESH_TOKEN_KEY: &str = "refreshToken";
#[cfg(feature = "csr")]
const USER_KEY: &str = "user";

/// Everything the store holds. All fields are independently absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

/// Persistence contract for session credentials.
///
/// The store is a mirror of the in-memory session, not a second source of
/// truth: the session manager and the refresh path are its only writers.
pub trait TokenStore {
    fn load(&self) -> StoredSession;
    /// Write all three entries. A login without a refresh token (implicit
    /// grant) removes any stale refresh token.
    fn save(&self, access_token: &str, refresh_token: Option<&str>, user: &User);
    /// Replace just the access token, keeping refresh token and user.
    fn set_access_token(&self, access_token: &str);
    fn clear(&self);
}

/// `localStorage`-backed store. Off-browser every read is empty and every
/// write is a no-op.
pub struct LocalStore;

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for LocalStore {
    fn load(&self) -> StoredSession {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = storage() else {
                return StoredSession::default();
            };
            let read = |key: &str| storage.get_item(key).ok().flatten();
            StoredSession {
                access_token: read(ACCESS_TOKEN_KEY),
                refresh_token: read(REFRESH_TOKEN_KEY),
                user: read(USER_KEY).and_then(|raw| serde_json::from_str(&raw).ok()),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            StoredSession::default()
        }
    }

    fn save(&self, access_token: &str, refresh_token: Option<&str>, user: &User) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = storage() {
                let _ = storage.set_item(ACCESS_TOKEN_KEY, access_token);
                match refresh_token {
                    Some(token) => {
                        let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
                    }
                    None => {
                        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
                    }
                }
                if let Ok(raw) = serde_json::to_string(user) {
                    let _ = storage.set_item(USER_KEY, &raw);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (access_token, refresh_token, user);
        }
    }

    fn set_access_token(&self, access_token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = storage() {
                let _ = storage.set_item(ACCESS_TOKEN_KEY, access_token);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access_token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = storage() {
                let _ = storage.remove_item(ACCESS_TOKEN_KEY);
                let _ = storage.remove_item(REFRESH_TOKEN_KEY);
                let _ = storage.remove_item(USER_KEY);
            }
        }
    }
}

/// In-memory store for tests and headless use.
#[derive(Default)]
pub struct MemoryStore {
    inner: std::cell::RefCell<StoredSession>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(session: StoredSession) -> Self {
        Self { inner: std::cell::RefCell::new(session) }
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> StoredSession {
        self.inner.borrow().clone()
    }

    fn save(&self, access_token: &str, refresh_token: Option<&str>, user: &User) {
        *self.inner.borrow_mut() = StoredSession {
            access_token: Some(access_token.to_owned()),
            refresh_token: refresh_token.map(ToOwned::to_owned),
            user: Some(user.clone()),
        };
    }

    fn set_access_token(&self, access_token: &str) {
        self.inner.borrow_mut().access_token = Some(access_token.to_owned());
    }

    fn clear(&self) {
        *self.inner.borrow_mut() = StoredSession::default();
    }
}
