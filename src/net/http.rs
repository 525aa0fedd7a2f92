//! Minimal HTTP transport abstraction.
//!
//! Browser builds use `gloo-net`; everything above the transport is written
//! against the `Http` trait so the session/refresh logic can be exercised
//! with a scripted transport in tests.

use futures::future::LocalBoxFuture;

/// HTTP methods the backend contract uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// An outgoing request. Bodies are always JSON.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The value of the first header with the given name, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A settled response: status plus raw body text.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Body`] when the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Body(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response body: {0}")]
    Body(String),
}

/// Transport seam. The browser implementation performs a real fetch; tests
/// inject scripted responders.
pub trait Http {
    fn send(&self, req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, HttpError>>;
}

/// `gloo-net` transport for the browser.
#[cfg(feature = "csr")]
pub struct BrowserHttp;

#[cfg(feature = "csr")]
impl Http for BrowserHttp {
    fn send(&self, req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, HttpError>> {
        Box::pin(async move {
            let mut builder = match req.method {
                Method::Get => gloo_net::http::Request::get(&req.url),
                Method::Post => gloo_net::http::Request::post(&req.url),
                Method::Delete => gloo_net::http::Request::delete(&req.url),
            };
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }

            let result = match req.body {
                Some(body) => {
                    builder
                        .header("Content-Type", "application/json")
                        .json(&body)
                        .map_err(|e| HttpError::Network(e.to_string()))?
                        .send()
                        .await
                }
                None => builder.send().await,
            };
            let resp = result.map_err(|e| HttpError::Network(e.to_string()))?;

            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        })
    }
}

/// Transport used off-browser, where no network is available. Every send
/// fails; pages degrade the same way the browser does when offline.
pub struct NullHttp;

impl Http for NullHttp {
    fn send(&self, _req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, HttpError>> {
        Box::pin(async { Err(HttpError::Network("no transport available".to_owned())) })
    }
}
