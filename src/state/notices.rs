//! Paginated notice list state shared by the home and search pages.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use crate::net::types::{Notice, NoticesPage};

/// One rendered list of notices plus its pagination cursor.
///
/// `page` is one-based for display; the API layer translates to the wire's
/// zero-based pages.
#[derive(Clone, Debug, Default)]
pub struct NoticesState {
    pub items: Vec<Notice>,
    pub loading: bool,
    pub page: u32,
    pub total_pages: u32,
    pub error: Option<String>,
}

impl NoticesState {
    /// Replace the list with a fetched page.
    pub fn apply_page(&mut self, items: Vec<Notice>, page: &NoticesPage) {
        self.items = items;
        self.page = page.current_page + 1;
        self.total_pages = page.total_pages;
        self.loading = false;
        self.error = None;
    }

    /// Record a fetch failure; the list itself is left as it was.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Flip the bookmark flag on one item after the server confirmed it.
    pub fn set_bookmark(&mut self, notice_id: &str, bookmarked: bool) {
        if let Some(item) = self.items.iter_mut().find(|n| n.id == notice_id) {
            item.is_bookmarked = bookmarked;
        }
    }

    #[must_use]
    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }
}
