//! Post entity, reduced to what tag maintenance needs.

use super::{PostId, TagId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A post and its tag associations.
///
/// The set representation makes "no duplicate tag-post pairs" structural:
/// reassigning a tag a post already carries collapses to one association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub tags: BTreeSet<TagId>,
}

impl Post {
    /// Creates a post carrying the given tags.
    pub fn new(post_id: PostId, tags: impl IntoIterator<Item = TagId>) -> Self {
        Self {
            post_id,
            tags: tags.into_iter().collect(),
        }
    }

    /// True when the post is associated with the tag.
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.contains(tag_id)
    }

    /// Replaces `from` with `to` in the association set. A post already
    /// carrying both ends up with a single `to` association.
    pub fn retag(&mut self, from: &TagId, to: &TagId) {
        if self.tags.remove(from) {
            self.tags.insert(to.clone());
        }
    }
}
