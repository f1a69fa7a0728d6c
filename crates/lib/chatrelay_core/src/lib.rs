//! # chatrelay_core
//!
//! Core domain logic for Chatrelay: chat messages, the in-memory session
//! store with history trimming, the API-key registry, and the provider
//! adapter that talks to the remote generative-AI service.

pub mod keys;
pub mod message;
pub mod provider;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
