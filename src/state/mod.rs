//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `notices`, `onboarding`) so individual
//! pages can depend on small focused models. Mutations are plain functions
//! over `&mut` state; the reactive `RwSignal` wrapper lives at the call
//! sites, which keeps every transition testable without a runtime.

pub mod auth;
pub mod notices;
pub mod onboarding;
