//! Posts provider, reduced to the association maintenance tag merging
//! needs.

use crate::partitions::POSTS;
use plumeria_commons::{ApiResult, Post, PostId, TagId};
use plumeria_store::{entity, sequences, StoreTransaction};

/// Model operations on posts.
pub struct PostsProvider;

impl PostsProvider {
    /// Reads a post by id.
    pub fn get(tx: &dyn StoreTransaction, post_id: &PostId) -> ApiResult<Option<Post>> {
        Ok(entity::get(tx, &POSTS, post_id)?)
    }

    /// Allocates the next post id within the transaction.
    pub fn next_id(tx: &mut dyn StoreTransaction) -> ApiResult<PostId> {
        let n = sequences::next(tx, "posts")?;
        Ok(PostId::new(format!("p_{}", n)))
    }

    /// Inserts or updates a post.
    pub fn save(tx: &mut dyn StoreTransaction, post: &Post) -> ApiResult<()> {
        entity::put(tx, &POSTS, &post.post_id, post)?;
        Ok(())
    }

    /// Returns every post, in key order.
    pub fn all(tx: &dyn StoreTransaction) -> ApiResult<Vec<Post>> {
        Ok(entity::scan(tx, &POSTS)?)
    }

    /// Returns every post associated with the tag.
    pub fn find_with_tag(tx: &dyn StoreTransaction, tag_id: &TagId) -> ApiResult<Vec<Post>> {
        Ok(Self::all(tx)?
            .into_iter()
            .filter(|p| p.has_tag(tag_id))
            .collect())
    }
}
