//! Tag merge scenarios: association movement, alias folding,
//! idempotence, unused-tag collection.

mod common;

use common::*;
use plumeria_commons::TagName;

#[tokio::test]
async fn test_merge_moves_posts_and_records_alias() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;
    seed_post(&t.backend, "p_2", &["t_1", "t_2"]).await;
    seed_post(&t.backend, "p_3", &["t_2"]).await;

    let merged = merge_tags(&t.api, "scenery", "landscape").await.unwrap();

    assert_eq!(merged.name, TagName::new("landscape"));
    assert!(merged.answers_to(&TagName::new("scenery")));

    // Every post previously tagged scenery now carries landscape, with
    // no duplicate associations.
    for post_id in ["p_1", "p_2", "p_3"] {
        let post = load_post(&t.backend, post_id).await.unwrap();
        assert_eq!(post.tags.len(), 1, "post {}", post_id);
        assert!(post.has_tag(&merged.tag_id));
    }

    // The source canonical name is gone.
    assert!(load_tag_by_name(&t.backend, "scenery").await.is_none());
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;

    merge_tags(&t.api, "scenery", "landscape").await.unwrap();

    // Merging again: the source is already gone.
    let err = merge_tags(&t.api, "scenery", "landscape").await.unwrap_err();
    assert_eq!(err.kind(), "NotFoundError");
    assert_eq!(err.to_string(), "Tag 'scenery' not found");

    // The target is unchanged.
    let target = load_tag_by_name(&t.backend, "landscape").await.unwrap();
    assert!(target.answers_to(&TagName::new("scenery")));
    let post = load_post(&t.backend, "p_1").await.unwrap();
    assert!(post.has_tag(&target.tag_id));
}

#[tokio::test]
async fn test_merging_a_tag_into_itself_is_a_noop() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "landscape").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;

    let merged = merge_tags(&t.api, "landscape", "landscape").await.unwrap();
    assert_eq!(merged.name, TagName::new("landscape"));

    let tag = load_tag_by_name(&t.backend, "landscape").await.unwrap();
    assert!(tag.aliases.is_empty());
}

#[tokio::test]
async fn test_self_merge_of_unused_tag_still_succeeds() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "lonely").await;

    merge_tags(&t.api, "lonely", "lonely").await.unwrap();
    assert!(load_tag_by_name(&t.backend, "lonely").await.is_some());
}

#[tokio::test]
async fn test_merge_missing_tags_report_not_found() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "landscape").await;

    let err = merge_tags(&t.api, "ghost", "landscape").await.unwrap_err();
    assert_eq!(err.to_string(), "Tag 'ghost' not found");

    let err = merge_tags(&t.api, "landscape", "ghost").await.unwrap_err();
    assert_eq!(err.to_string(), "Tag 'ghost' not found");
}

#[tokio::test]
async fn test_merge_collects_stale_unused_tags() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;
    seed_tag(&t.backend, "t_3", "stale").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;

    merge_tags(&t.api, "scenery", "landscape").await.unwrap();

    // The unrelated zero-usage tag was garbage collected along the way.
    assert!(load_tag_by_name(&t.backend, "stale").await.is_none());
}

#[tokio::test]
async fn test_merge_of_unused_source_is_not_blocked_by_collection() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;

    // Neither tag has any posts; the pre-merge collection must spare
    // them both.
    let merged = merge_tags(&t.api, "scenery", "landscape").await.unwrap();
    assert!(merged.answers_to(&TagName::new("scenery")));
    assert!(load_tag_by_name(&t.backend, "landscape").await.is_some());
}

#[tokio::test]
async fn test_merge_folds_source_aliases_into_target() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;
    merge_tags(&t.api, "scenery", "landscape").await.unwrap();

    seed_tag(&t.backend, "t_3", "vista").await;
    seed_post(&t.backend, "p_2", &["t_3"]).await;
    let merged = merge_tags(&t.api, "landscape", "vista").await.unwrap();

    // Chained merges accumulate the whole alias history.
    assert!(merged.answers_to(&TagName::new("landscape")));
    assert!(merged.answers_to(&TagName::new("scenery")));
}

#[tokio::test]
async fn test_merge_audit_line() {
    let t = test_api(|c| grant(c, "mergeTags"));
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;
    seed_post(&t.backend, "p_1", &["t_1"]).await;

    merge_tags(&t.api, "scenery", "landscape").await.unwrap();

    let lines = t.sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("anonymous user merged scenery with landscape"));
}

#[tokio::test]
async fn test_merge_requires_privilege() {
    let t = test_api(|_| {});
    seed_tag(&t.backend, "t_1", "scenery").await;
    seed_tag(&t.backend, "t_2", "landscape").await;

    let err = merge_tags(&t.api, "scenery", "landscape").await.unwrap_err();
    assert_eq!(err.kind(), "InsufficientPrivilegeError");

    // Nothing happened, not even the unused-tag collection.
    assert!(load_tag_by_name(&t.backend, "scenery").await.is_some());
}
