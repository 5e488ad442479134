//! Tags provider.
//!
//! Usage counts are always derived from post associations. Merge and
//! unused-tag collection are whole operations here so a job can never
//! observe or persist a half-applied tag graph; the caller's transaction
//! makes them atomic.

use super::posts::PostsProvider;
use crate::partitions::TAGS;
use plumeria_commons::{ApiError, ApiResult, Tag, TagId, TagName};
use plumeria_store::{entity, sequences, StoreTransaction};

/// Model operations on tags.
pub struct TagsProvider;

impl TagsProvider {
    /// Reads a tag by id.
    pub fn get(tx: &dyn StoreTransaction, tag_id: &TagId) -> ApiResult<Option<Tag>> {
        Ok(entity::get(tx, &TAGS, tag_id)?)
    }

    /// Finds a tag by its canonical name, case-insensitively. Alias
    /// names do not match; a merged-away name is only reachable through
    /// `resolve`.
    pub fn find_by_name(tx: &dyn StoreTransaction, name: &TagName) -> ApiResult<Option<Tag>> {
        let wanted = name.to_lowercase();
        Ok(Self::all(tx)?
            .into_iter()
            .find(|t| t.name.to_lowercase() == wanted))
    }

    /// Resolves a name to a tag, following aliases.
    pub fn resolve(tx: &dyn StoreTransaction, name: &TagName) -> ApiResult<Option<Tag>> {
        Ok(Self::all(tx)?.into_iter().find(|t| t.answers_to(name)))
    }

    /// Returns every tag, in key order.
    pub fn all(tx: &dyn StoreTransaction) -> ApiResult<Vec<Tag>> {
        Ok(entity::scan(tx, &TAGS)?)
    }

    /// Allocates the next tag id within the transaction.
    pub fn next_id(tx: &mut dyn StoreTransaction) -> ApiResult<TagId> {
        let n = sequences::next(tx, "tags")?;
        Ok(TagId::new(format!("t_{}", n)))
    }

    /// Inserts a new tag; the name must not collide with any canonical
    /// name or alias.
    pub fn create(tx: &mut dyn StoreTransaction, tag: &Tag) -> ApiResult<()> {
        if Self::resolve(tx, &tag.name)?.is_some() {
            return Err(ApiError::policy(format!(
                "Tag '{}' already exists",
                tag.name
            )));
        }
        entity::put(tx, &TAGS, &tag.tag_id, tag)?;
        Ok(())
    }

    /// Updates an existing tag.
    pub fn save(tx: &mut dyn StoreTransaction, tag: &Tag) -> ApiResult<()> {
        if Self::get(tx, &tag.tag_id)?.is_none() {
            return Err(ApiError::not_found(format!("Tag '{}' not found", tag.name)));
        }
        entity::put(tx, &TAGS, &tag.tag_id, tag)?;
        Ok(())
    }

    /// Deletes a tag row. Post associations are the caller's business.
    pub fn delete(tx: &mut dyn StoreTransaction, tag_id: &TagId) -> ApiResult<()> {
        entity::delete(tx, &TAGS, tag_id)?;
        Ok(())
    }

    /// Number of posts currently associated with the tag.
    pub fn usage_count(tx: &dyn StoreTransaction, tag_id: &TagId) -> ApiResult<usize> {
        Ok(PostsProvider::find_with_tag(tx, tag_id)?.len())
    }

    /// Deletes every tag with zero post associations. Returns the names
    /// of the removed tags.
    pub fn remove_unused(tx: &mut dyn StoreTransaction) -> ApiResult<Vec<TagName>> {
        Self::remove_unused_except(tx, &[])
    }

    /// Deletes every tag with zero post associations except the listed
    /// ones. Merging keeps its own source and target alive through this,
    /// so a stale unused tag can never block a merge.
    pub fn remove_unused_except(
        tx: &mut dyn StoreTransaction,
        keep: &[&TagId],
    ) -> ApiResult<Vec<TagName>> {
        let mut removed = Vec::new();
        for tag in Self::all(tx)? {
            if keep.contains(&&tag.tag_id) {
                continue;
            }
            if Self::usage_count(tx, &tag.tag_id)? == 0 {
                entity::delete(tx, &TAGS, &tag.tag_id)?;
                removed.push(tag.name);
            }
        }
        if !removed.is_empty() {
            log::debug!("removed {} unused tag(s)", removed.len());
        }
        Ok(removed)
    }

    /// Merges `source` into `target`:
    /// every post association moves from source to target (collapsing
    /// duplicates), source's aliases and its own name fold into target's
    /// alias set, and the source row is deleted. Merging a tag into
    /// itself is a no-op that still succeeds. Returns the updated target.
    pub fn merge(
        tx: &mut dyn StoreTransaction,
        source: &TagName,
        target: &TagName,
    ) -> ApiResult<Tag> {
        let source_tag = Self::find_by_name(tx, source)?
            .ok_or_else(|| ApiError::not_found(format!("Tag '{}' not found", source)))?;
        let mut target_tag = Self::find_by_name(tx, target)?
            .ok_or_else(|| ApiError::not_found(format!("Tag '{}' not found", target)))?;

        if source_tag.tag_id == target_tag.tag_id {
            return Ok(target_tag);
        }

        for mut post in PostsProvider::find_with_tag(tx, &source_tag.tag_id)? {
            post.retag(&source_tag.tag_id, &target_tag.tag_id);
            PostsProvider::save(tx, &post)?;
        }

        for alias in &source_tag.aliases {
            target_tag.add_alias(alias.clone());
        }
        target_tag.add_alias(source_tag.name.clone());

        Self::delete(tx, &source_tag.tag_id)?;
        entity::put(tx, &TAGS, &target_tag.tag_id, &target_tag)?;

        log::debug!("merged tag '{}' into '{}'", source, target);
        Ok(target_tag)
    }
}
