//! Tag entity.

use super::{TagId, TagName};
use serde::{Deserialize, Serialize};

/// A canonical tag.
///
/// Usage count is never stored on the tag; it is always derived from the
/// post associations so it cannot drift. `aliases` holds alternate names
/// that resolve to this tag, including the names of tags merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: TagId,
    pub name: TagName,
    pub category: String,
    pub aliases: Vec<TagName>,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl Tag {
    /// True when `name` matches the canonical name or any alias,
    /// case-insensitively.
    pub fn answers_to(&self, name: &TagName) -> bool {
        let wanted = name.to_lowercase();
        self.name.to_lowercase() == wanted
            || self.aliases.iter().any(|a| a.to_lowercase() == wanted)
    }

    /// Adds an alias unless it is already present or shadows the
    /// canonical name.
    pub fn add_alias(&mut self, alias: TagName) {
        if self.name.to_lowercase() == alias.to_lowercase() {
            return;
        }
        if !self.aliases.iter().any(|a| a.to_lowercase() == alias.to_lowercase()) {
            self.aliases.push(alias);
        }
    }
}
