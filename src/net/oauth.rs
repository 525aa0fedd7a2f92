//! Google OAuth redirect handling.
//!
//! The callback route receives either an authorization code in the query
//! string, an implicit-grant access token in the URL fragment, or a
//! provider-reported error. One parser classifies the redirect; one exchange
//! call turns the result into an application session.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use super::client::ApiClient;
use super::http::Method;
use super::types::User;

/// Everything a provider redirect can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OAuthRedirect {
    /// Authorization code, to be exchanged with the backend.
    Code(String),
    /// Implicit-grant access token from the URL fragment (legacy flow).
    ImplicitToken(String),
    /// The provider reported an error (e.g. `access_denied`).
    ProviderError(String),
    /// Neither an error, a code, nor a token was present.
    Malformed,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("token exchange failed: {0}")]
    Exchange(String),
    #[error("malformed token response: missing {0}")]
    MalformedResponse(&'static str),
}

/// Tokens and user produced by a successful exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginBundle {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Classify a redirect from its query string and fragment.
///
/// Precedence: a provider `error` wins, then a `code`, then a fragment
/// `access_token`. Empty values count as absent.
#[must_use]
pub fn parse_redirect(query: &str, fragment: &str) -> OAuthRedirect {
    let query_params = parse_params(query);
    if let Some(reason) = lookup(&query_params, "error") {
        return OAuthRedirect::ProviderError(reason);
    }
    if let Some(code) = lookup(&query_params, "code") {
        return OAuthRedirect::Code(code);
    }
    let fragment_params = parse_params(fragment);
    if let Some(token) = lookup(&fragment_params, "access_token") {
        return OAuthRedirect::ImplicitToken(token);
    }
    OAuthRedirect::Malformed
}

/// Exchange a parsed redirect with the backend for an application session.
///
/// # Errors
///
/// [`OAuthError::Provider`] for error/malformed redirects (no network call
/// is made), [`OAuthError::Exchange`] when the backend call fails, and
/// [`OAuthError::MalformedResponse`] when its payload lacks required fields.
pub async fn exchange_redirect(
    api: &ApiClient,
    redirect: &OAuthRedirect,
    redirect_uri: &str,
) -> Result<LoginBundle, OAuthError> {
    let body = match redirect {
        OAuthRedirect::Code(code) => {
            serde_json::json!({ "code": code, "redirectUri": redirect_uri })
        }
        OAuthRedirect::ImplicitToken(token) => {
            serde_json::json!({ "accessToken": token, "redirectUri": redirect_uri })
        }
        OAuthRedirect::ProviderError(reason) => {
            return Err(OAuthError::Provider(reason.clone()));
        }
        OAuthRedirect::Malformed => {
            return Err(OAuthError::Provider("missing authorization code".to_owned()));
        }
    };

    let req = api
        .to(Method::Post, "/api/auth/google/callback")
        .with_body(body);
    let resp = api
        .request_unauthenticated(req)
        .await
        .map_err(|e| OAuthError::Exchange(e.to_string()))?;
    if !resp.is_success() {
        return Err(OAuthError::Exchange(format!("status {}", resp.status)));
    }
    let value: serde_json::Value = resp
        .json()
        .map_err(|e| OAuthError::Exchange(e.to_string()))?;

    // Some backend revisions wrap the payload in a { data } envelope.
    let payload = value.get("data").filter(|d| d.is_object()).unwrap_or(&value);
    normalize_login_response(payload)
}

/// Normalize a token-endpoint payload into a [`LoginBundle`].
///
/// Access token precedence: `accessToken`, `access_token`, `jwt`. Refresh
/// token: `refreshToken`, `refresh_token`. User fields are read from the top
/// level first, then from a nested `user` object; a missing access token or
/// user id is an error, never a silent default.
pub fn normalize_login_response(value: &serde_json::Value) -> Result<LoginBundle, OAuthError> {
    let access_token = pick_string(value, None, &["accessToken", "access_token", "jwt"])
        .ok_or(OAuthError::MalformedResponse("access token"))?;
    let refresh_token = pick_string(value, None, &["refreshToken", "refresh_token"]);

    let nested = value.get("user");
    let id = pick_string(value, nested, &["id"])
        .ok_or(OAuthError::MalformedResponse("user id"))?;
    let email = pick_string(value, nested, &["email"]).unwrap_or_default();
    let name = pick_string(value, nested, &["name"]).unwrap_or_default();
    let profile_image = pick_string(value, nested, &["profileImage", "picture"]);

    Ok(LoginBundle {
        access_token,
        refresh_token,
        user: User { id, email, name, profile_image },
    })
}

/// First non-empty string (or number, stringified) among the given fields,
/// checking the top-level object before the nested one.
fn pick_string(
    value: &serde_json::Value,
    nested: Option<&serde_json::Value>,
    fields: &[&str],
) -> Option<String> {
    for field in fields {
        for scope in [Some(value), nested].iter().flatten() {
            match scope.get(field) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
                _ => {}
            }
        }
    }
    None
}

fn lookup(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .filter(|v| !v.is_empty())
}

/// Split a query string or fragment (with or without its `?`/`#` prefix)
/// into decoded key/value pairs.
fn parse_params(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim_start_matches(['?', '#']);
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Percent-decode a URL component; `+` decodes to a space.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
