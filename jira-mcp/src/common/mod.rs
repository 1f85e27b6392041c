//! Common utilities shared across modules

/// Prefixed environment variable loading
pub mod env_loader;
