//! Repository-style model operations for Plumeria.
//!
//! One provider per entity, all operating on the caller's open
//! `StoreTransaction`. Model invariants live here: case-insensitive
//! uniqueness, derived usage counts, alias folding, unused-tag
//! collection, so jobs can only mutate state through operations that
//! keep the data consistent.

pub mod partitions;
pub mod providers;

pub use providers::audit_logs::AuditLogsProvider;
pub use providers::posts::PostsProvider;
pub use providers::tags::TagsProvider;
pub use providers::users::UsersProvider;
