//! Wire types for the 차차캐치 backend and their local counterparts.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

/// Authenticated user, cached in the token store and replaced wholesale on
/// login; never field-patched.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// A notice as the backend serializes it.
///
/// Bookmark state has appeared under both `isSaved` and `isBookmarked`
/// across backend revisions; both are accepted.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNotice {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, alias = "isBookmarked")]
    pub is_saved: bool,
    #[serde(default)]
    pub is_new: bool,
}

/// One page of notices from the list/search endpoints.
///
/// `current_page` is zero-based on the wire; the UI shows it one-based.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticesPage {
    #[serde(default)]
    pub notices: Vec<ApiNotice>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// A notice category from `/api/categories`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Onboarding profile: department, year, enrollment status, subscribed
/// categories, and alarm keywords.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A notice as the UI renders it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub department: String,
    pub date: String,
    pub is_bookmarked: bool,
    pub is_new: bool,
    pub content: String,
    pub image: Option<String>,
    pub original_link: String,
}

/// Convert a wire notice into its local rendering form.
#[must_use]
pub fn transform_api_notice(wire: &ApiNotice) -> Notice {
    Notice {
        id: wire.id.to_string(),
        title: wire.title.clone(),
        department: wire.department.clone(),
        date: format_published_date(&wire.published_date),
        is_bookmarked: wire.is_saved,
        is_new: wire.is_new,
        content: wire.content.clone(),
        image: wire.image_url.clone(),
        original_link: wire.original_url.clone(),
    }
}

/// Reformat an ISO-ish `YYYY-MM-DD[T..]` date as the `YYYY.MM.DD` the UI
/// shows. Anything that does not look like a date passes through unchanged.
fn format_published_date(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    let fields: Vec<&str> = date_part.split('-').collect();
    if fields.len() == 3 && fields.iter().all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit())) {
        fields.join(".")
    } else {
        raw.to_owned()
    }
}
