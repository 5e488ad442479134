//! Job implementations.

pub mod merge_tags;
pub mod register_user;

pub use merge_tags::MergeTagsJob;
pub use register_user::RegisterUserJob;
