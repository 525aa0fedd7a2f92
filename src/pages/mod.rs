//! Route-level page components.

pub mod home;
pub mod login;
pub mod notifications;
pub mod oauth_callback;
pub mod onboarding;
pub mod search;
