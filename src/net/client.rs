//! Resilient API request layer.
//!
//! Wraps every authenticated call: attaches the bearer token, and on a 401
//! runs a single-flight token refresh shared by all concurrent callers, then
//! replays each caller's original request with the new token. A failed
//! refresh is fatal for the session: the store is cleared, every parked
//! caller is rejected, and the session-expired hook (login redirect in the
//! browser) fires exactly once.
//!
//! The event loop is single-threaded, so the coordination state is a plain
//! `RefCell`: a `refreshing` flag plus a FIFO queue of oneshot senders.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;

use super::http::{Http, HttpError, HttpRequest, HttpResponse, Method};
use super::token_store::TokenStore;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Terminal auth failure: no refresh token, or the refresh call failed.
    #[error("session expired")]
    SessionExpired,
    #[error("unexpected status {0}")]
    Status(u16),
}

type RefreshOutcome = Result<String, ApiError>;

#[derive(Default)]
struct RefreshGuard {
    /// At most one refresh network call is in flight while this is set.
    refreshing: bool,
    /// Callers that hit a 401 while a refresh was underway, FIFO.
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// API client owning the refresh-coordination state.
///
/// Constructed once at startup and shared via context; all authenticated
/// traffic goes through [`ApiClient::request`].
pub struct ApiClient {
    base_url: String,
    http: Rc<dyn Http>,
    store: Rc<dyn TokenStore>,
    refresh: RefCell<RefreshGuard>,
    on_session_expired: Box<dyn Fn()>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Rc<dyn Http>,
        store: Rc<dyn TokenStore>,
        on_session_expired: Box<dyn Fn()>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            store,
            refresh: RefCell::new(RefreshGuard::default()),
            on_session_expired,
        }
    }

    #[must_use]
    pub fn token_store(&self) -> Rc<dyn TokenStore> {
        Rc::clone(&self.store)
    }

    /// Build a request against the configured base URL.
    #[must_use]
    pub fn to(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.base_url))
    }

    /// Issue a request with the current access token attached.
    ///
    /// A 401 triggers one shared refresh followed by a single retry with the
    /// new token; every other status, success or not, passes through to the
    /// caller unchanged.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] for transport failures and
    /// [`ApiError::SessionExpired`] when the session cannot be recovered.
    pub async fn request(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let token = self.store.load().access_token;
        let resp = self.send_with_token(req.clone(), token.as_deref()).await?;
        if resp.status != 401 {
            return Ok(resp);
        }

        let new_token = self.refresh_access_token().await?;
        Ok(self.send_with_token(req, Some(&new_token)).await?)
    }

    /// Issue a request without touching the session: no bearer token, no
    /// refresh. Used for the OAuth exchange, which runs before login.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] for transport failures.
    pub async fn request_unauthenticated(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        Ok(self.http.send(req).await?)
    }

    async fn send_with_token(
        &self,
        mut req: HttpRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        if let Some(token) = token {
            req = req.with_header("Authorization", format!("Bearer {token}"));
        }
        self.http.send(req).await
    }

    /// Obtain a fresh access token, joining an in-flight refresh if one is
    /// already underway.
    async fn refresh_access_token(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.store.load().refresh_token else {
            self.expire_session();
            return Err(ApiError::SessionExpired);
        };

        // Join an in-flight refresh rather than issuing a second call.
        let parked = {
            let mut guard = self.refresh.borrow_mut();
            if guard.refreshing {
                let (tx, rx) = oneshot::channel();
                guard.waiters.push(tx);
                Some(rx)
            } else {
                guard.refreshing = true;
                None
            }
        };
        if let Some(rx) = parked {
            return match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Err(ApiError::SessionExpired),
            };
        }

        let outcome = self.call_refresh_endpoint(&refresh_token).await;

        // Reset the flag unconditionally before fanning out the outcome.
        let waiters = {
            let mut guard = self.refresh.borrow_mut();
            guard.refreshing = false;
            std::mem::take(&mut guard.waiters)
        };

        match outcome {
            Ok(token) => {
                // Persist before releasing anyone, so no waiter can retry
                // with a stale stored token.
                self.store.set_access_token(&token);
                for waiter in waiters {
                    let _ = waiter.send(Ok(token.clone()));
                }
                Ok(token)
            }
            Err(err) => {
                self.store.clear();
                for waiter in waiters {
                    let _ = waiter.send(Err(ApiError::SessionExpired));
                }
                (self.on_session_expired)();
                Err(err)
            }
        }
    }

    async fn call_refresh_endpoint(&self, refresh_token: &str) -> RefreshOutcome {
        let req = self
            .to(Method::Post, "/auth/refresh")
            .with_body(serde_json::json!({ "refreshToken": refresh_token }));
        let resp = self.http.send(req).await?;
        if !resp.is_success() {
            return Err(ApiError::SessionExpired);
        }
        let value: serde_json::Value = resp.json()?;
        extract_refreshed_token(&value).ok_or(ApiError::SessionExpired)
    }

    fn expire_session(&self) {
        self.store.clear();
        (self.on_session_expired)();
    }
}

/// Pull the new access token out of a refresh response.
///
/// Field precedence: `accessToken`, then `token`, then `jwt`; each is also
/// tried under a `data` envelope.
#[must_use]
pub fn extract_refreshed_token(value: &serde_json::Value) -> Option<String> {
    const FIELDS: [&str; 3] = ["accessToken", "token", "jwt"];
    let scopes = [Some(value), value.get("data")];
    for field in FIELDS {
        for scope in scopes.iter().flatten() {
            if let Some(token) = scope.get(field).and_then(serde_json::Value::as_str) {
                if !token.is_empty() {
                    return Some(token.to_owned());
                }
            }
        }
    }
    None
}
