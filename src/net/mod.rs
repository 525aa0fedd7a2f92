//! Network layer: transport, token persistence, the resilient API client,
//! typed endpoint helpers, and OAuth redirect handling.

pub mod api;
pub mod client;
pub mod http;
pub mod oauth;
pub mod token_store;
pub mod types;

#[cfg(test)]
pub mod testing;
