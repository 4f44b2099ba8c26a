//! # Pinboard Shared Library
//!
//! Shared types and business logic used by the Pinboard API server and the
//! board client.
//!
//! ## Module Organization
//!
//! - `models`: Database models and repository-style data access
//! - `services`: Domain services (permission check + persistence per operation)
//! - `auth`: Authentication and authorization primitives
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod services;

/// Current version of the Pinboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
