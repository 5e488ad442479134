//! Configuration for the Plumeria backend.
//!
//! Loaded once at startup from a TOML file and treated as read-only for
//! the lifetime of every request.

pub mod config;

pub use config::types::{
    LoggingSettings, PrivilegeSettings, RegistrationSettings, ServerConfig,
};
