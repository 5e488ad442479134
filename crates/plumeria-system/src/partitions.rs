//! Keyspace names used by the providers.

use plumeria_store::Partition;

pub const USERS: Partition = Partition::new("users");
pub const TAGS: Partition = Partition::new("tags");
pub const POSTS: Partition = Partition::new("posts");
pub const AUDIT_LOG: Partition = Partition::new("audit_log");
