//! Reusable view components.

pub mod alert;
pub mod bottom_nav;
pub mod header;
pub mod notice_card;
pub mod notice_modal;
pub mod pagination;
pub mod require_auth;
