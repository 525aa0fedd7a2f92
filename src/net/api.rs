//! Typed endpoint helpers over the resilient [`ApiClient`].
//!
//! Every payload arrives in the backend's `{ data, message, success }`
//! envelope. Pagination is one-based in the UI and zero-based on the wire;
//! the translation happens here and nowhere else.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::{ApiClient, ApiError};
use super::http::Method;
use super::types::{ApiNotice, Category, Notice, NoticesPage, Profile, transform_api_notice};

/// Standard response envelope.
#[derive(Debug, serde::Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

/// Query for the notice list and search endpoints. `page` is one-based.
#[derive(Clone, Debug, Default)]
pub struct NoticeQuery {
    pub page: u32,
    pub category_id: Option<i64>,
    pub keyword: Option<String>,
    pub notice_type: Option<String>,
}

impl NoticeQuery {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self { page, ..Self::default() }
    }

    fn to_query_string(&self) -> String {
        // Zero-based on the wire.
        let mut params = vec![format!("page={}", self.page.saturating_sub(1))];
        if let Some(category_id) = self.category_id {
            params.push(format!("categoryId={category_id}"));
        }
        if let Some(keyword) = &self.keyword {
            if !keyword.is_empty() {
                params.push(format!("keyword={keyword}"));
            }
        }
        if let Some(notice_type) = &self.notice_type {
            params.push(format!("type={notice_type}"));
        }
        params.join("&")
    }
}

#[must_use]
pub(crate) fn notices_path(base: &str, query: &NoticeQuery) -> String {
    format!("{base}?{}", query.to_query_string())
}

async fn fetch_envelope<T: serde::de::DeserializeOwned>(
    api: &ApiClient,
    method: Method,
    path: &str,
) -> Result<T, ApiError> {
    let resp = api.request(api.to(method, path)).await?;
    if !resp.is_success() {
        return Err(ApiError::Status(resp.status));
    }
    let envelope: Envelope<T> = resp.json()?;
    Ok(envelope.data)
}

fn into_notices(page: NoticesPage) -> (Vec<Notice>, NoticesPage) {
    let notices = page.notices.iter().map(transform_api_notice).collect();
    (notices, page)
}

/// Validate the current access token.
///
/// A token that merely expired is refreshed transparently by the request
/// layer before this returns.
///
/// # Errors
///
/// Propagates transport failures and terminal session expiry.
pub async fn verify(api: &ApiClient) -> Result<bool, ApiError> {
    let resp = api.request(api.to(Method::Get, "/api/auth/verify")).await?;
    Ok(resp.is_success())
}

/// # Errors
///
/// See [`ApiClient::request`]; non-2xx statuses surface as [`ApiError::Status`].
pub async fn fetch_notices(
    api: &ApiClient,
    query: &NoticeQuery,
) -> Result<(Vec<Notice>, NoticesPage), ApiError> {
    let path = notices_path("/api/notices", query);
    Ok(into_notices(fetch_envelope(api, Method::Get, &path).await?))
}

/// # Errors
///
/// See [`fetch_notices`].
pub async fn fetch_saved_notices(
    api: &ApiClient,
    query: &NoticeQuery,
) -> Result<(Vec<Notice>, NoticesPage), ApiError> {
    let path = notices_path("/api/notices/saved", query);
    Ok(into_notices(fetch_envelope(api, Method::Get, &path).await?))
}

/// # Errors
///
/// See [`fetch_notices`].
pub async fn search_notices(
    api: &ApiClient,
    query: &NoticeQuery,
) -> Result<(Vec<Notice>, NoticesPage), ApiError> {
    let path = notices_path("/api/notices/search", query);
    Ok(into_notices(fetch_envelope(api, Method::Get, &path).await?))
}

/// Set or clear the bookmark on a notice. The local flag is only flipped
/// after this confirms.
///
/// # Errors
///
/// See [`fetch_notices`].
pub async fn set_bookmark(api: &ApiClient, notice_id: &str, bookmarked: bool) -> Result<(), ApiError> {
    let method = if bookmarked { Method::Post } else { Method::Delete };
    let resp = api
        .request(api.to(method, &format!("/api/notices/{notice_id}")))
        .await?;
    if !resp.is_success() {
        return Err(ApiError::Status(resp.status));
    }
    Ok(())
}

/// Category catalog; the endpoint itself requires no auth.
///
/// # Errors
///
/// See [`fetch_notices`].
pub async fn fetch_categories(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
    fetch_envelope(api, Method::Get, "/api/categories").await
}

/// # Errors
///
/// See [`fetch_notices`].
pub async fn fetch_profile(api: &ApiClient) -> Result<Profile, ApiError> {
    fetch_envelope(api, Method::Get, "/api/user/me/profile").await
}

/// # Errors
///
/// See [`fetch_notices`].
pub async fn save_profile(api: &ApiClient, profile: &Profile) -> Result<(), ApiError> {
    let body = serde_json::to_value(profile).map_err(|e| {
        ApiError::Http(super::http::HttpError::Body(e.to_string()))
    })?;
    let resp = api
        .request(api.to(Method::Post, "/api/user/me/profile").with_body(body))
        .await?;
    if !resp.is_success() {
        return Err(ApiError::Status(resp.status));
    }
    Ok(())
}

/// Notices matching the user's subscribed categories.
///
/// # Errors
///
/// See [`fetch_notices`].
pub async fn fetch_category_alarms(api: &ApiClient) -> Result<Vec<Notice>, ApiError> {
    let wire: Vec<ApiNotice> = fetch_envelope(api, Method::Get, "/api/alarms/categories").await?;
    Ok(wire.iter().map(transform_api_notice).collect())
}

/// Notices whose text matched a subscribed keyword.
///
/// # Errors
///
/// See [`fetch_notices`].
pub async fn fetch_keyword_alarms(api: &ApiClient) -> Result<Vec<Notice>, ApiError> {
    let wire: Vec<ApiNotice> = fetch_envelope(api, Method::Get, "/api/alarms/keywords").await?;
    Ok(wire.iter().map(transform_api_notice).collect())
}

/// Register a notice's deadline on the user's calendar.
///
/// The session access token rides along under `Google-Access-Token`; the
/// backend resolves the linked Google account from it.
///
/// # Errors
///
/// See [`fetch_notices`].
pub async fn register_calendar(
    api: &ApiClient,
    notice_id: &str,
    access_token: &str,
) -> Result<(), ApiError> {
    let req = api
        .to(Method::Post, &format!("/api/calendar/{notice_id}"))
        .with_header("Google-Access-Token", access_token);
    let resp = api.request(req).await?;
    if !resp.is_success() {
        return Err(ApiError::Status(resp.status));
    }
    Ok(())
}
