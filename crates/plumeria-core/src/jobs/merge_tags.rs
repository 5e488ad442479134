//! Tag merging.

use crate::access::Privilege;
use crate::args::{ARG_SOURCE_TAG_NAME, ARG_TARGET_TAG_NAME};
use crate::job::{Job, JobContext, JobOutcome};
use crate::requirements::Requirement;
use async_trait::async_trait;
use plumeria_commons::{ApiError, ApiResult, TagName};
use plumeria_system::TagsProvider;
use std::collections::BTreeMap;

/// Merges one tag into another.
///
/// Unused-tag collection runs first (sparing the two tags being merged,
/// so a stale zero-usage source or target never blocks the merge), then
/// every post association, the alias set and the source name itself fold
/// into the target. The whole operation runs in the dispatcher's single
/// transaction; it can never partially apply.
pub struct MergeTagsJob;

impl MergeTagsJob {
    pub const TYPE: &'static str = "merge-tags";
}

#[async_trait]
impl Job for MergeTagsJob {
    fn name(&self) -> &'static str {
        Self::TYPE
    }

    fn required_arguments(&self) -> Requirement {
        Requirement::conjunction([ARG_SOURCE_TAG_NAME, ARG_TARGET_TAG_NAME])
    }

    fn required_main_privilege(&self) -> Option<Privilege> {
        Some(Privilege::merge_tags())
    }

    async fn execute(&self, ctx: &mut JobContext<'_>) -> ApiResult<JobOutcome> {
        let source = TagName::new(ctx.require_str(ARG_SOURCE_TAG_NAME)?);
        let target = TagName::new(ctx.require_str(ARG_TARGET_TAG_NAME)?);

        let source_tag = TagsProvider::find_by_name(ctx.tx(), &source)?
            .ok_or_else(|| ApiError::not_found(format!("Tag '{}' not found", source)))?;
        let target_tag = TagsProvider::find_by_name(ctx.tx(), &target)?
            .ok_or_else(|| ApiError::not_found(format!("Tag '{}' not found", target)))?;

        TagsProvider::remove_unused_except(
            ctx.tx_mut(),
            &[&source_tag.tag_id, &target_tag.tag_id],
        )?;
        let merged = TagsProvider::merge(ctx.tx_mut(), &source, &target)?;

        ctx.record(
            "{user} merged {source} with {target}",
            BTreeMap::from([
                ("source".to_string(), source.to_string()),
                ("target".to_string(), target.to_string()),
            ]),
        );

        JobOutcome::from_value(&merged)
    }
}
