//! Type-safe wrapper types and entity models.
//!
//! Identifier newtypes prevent accidental mixing of user, tag, post and
//! audit-log keys at compile time. The entity models carry only the
//! attributes the job layer's invariants need; presentation concerns
//! belong to the excluded routing layer.

mod audit_log;
mod ids;
mod post;
mod rank;
mod tag;
mod tag_name;
mod user;
mod user_name;

pub use audit_log::{render_template, AuditLogEntry};
pub use ids::{AuditLogId, PostId, TagId, UserId};
pub use post::Post;
pub use rank::AccessRank;
pub use tag::Tag;
pub use tag_name::TagName;
pub use user::User;
pub use user_name::UserName;
