//! Shared models, typed identifiers and error types for Plumeria.
//!
//! This crate is dependency-light on purpose: every other Plumeria crate
//! builds on the types defined here, so nothing in this crate may pull in
//! storage, configuration or job-layer concerns.

pub mod errors;
pub mod models;
mod storage_key;

pub use errors::{ApiError, ApiResult};
pub use models::{
    AccessRank, AuditLogEntry, AuditLogId, Post, PostId, Tag, TagId, TagName, User, UserId,
    UserName,
};
pub use storage_key::StorageKey;
