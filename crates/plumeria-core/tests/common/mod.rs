//! Shared test harness: an Api over the in-memory backend with a
//! recording mailer and an in-memory audit sink.

#![allow(dead_code)]

use plumeria_auth::AuthContext;
use plumeria_commons::{ApiResult, Post, PostId, Tag, TagId, TagName, User};
use plumeria_configs::ServerConfig;
use plumeria_core::args::{
    ARG_NEW_EMAIL, ARG_NEW_PASSWORD, ARG_NEW_USER_NAME, ARG_SOURCE_TAG_NAME, ARG_TARGET_TAG_NAME,
};
use plumeria_core::jobs::{MergeTagsJob, RegisterUserJob};
use plumeria_core::{Api, ArgumentSet, MemorySink, RecordingMailer};
use plumeria_store::{MemoryBackend, StorageBackend};
use plumeria_system::{PostsProvider, TagsProvider};
use std::sync::Arc;

pub struct TestApi {
    pub backend: MemoryBackend,
    pub mailer: Arc<RecordingMailer>,
    pub sink: Arc<MemorySink>,
    pub api: Api,
}

/// Builds an Api. Privileges start out unset (deny everyone); grant what
/// the test needs in `configure`.
pub fn test_api(configure: impl FnOnce(&mut ServerConfig)) -> TestApi {
    let mut config = ServerConfig::default();
    configure(&mut config);

    let backend = MemoryBackend::new();
    let mailer = Arc::new(RecordingMailer::new());
    let sink = Arc::new(MemorySink::new());
    let api = Api::new(
        Arc::new(backend.clone()),
        Arc::new(config),
        mailer.clone(),
        sink.clone(),
    );

    TestApi {
        backend,
        mailer,
        sink,
        api,
    }
}

/// Grants a privilege to everyone, the way most scenarios start.
pub fn grant(config: &mut ServerConfig, privilege: &str) {
    config.privileges.set(privilege, "anonymous");
}

pub async fn register_user(
    api: &Api,
    name: &str,
    password: &str,
    email: Option<&str>,
) -> ApiResult<User> {
    let mut args = ArgumentSet::new()
        .with(ARG_NEW_USER_NAME, name)
        .with(ARG_NEW_PASSWORD, password);
    if let Some(email) = email {
        args = args.with(ARG_NEW_EMAIL, email);
    }
    let outcome = api.run(&RegisterUserJob, args, &AuthContext::anonymous()).await?;
    outcome.decode()
}

pub async fn merge_tags(api: &Api, source: &str, target: &str) -> ApiResult<Tag> {
    let args = ArgumentSet::new()
        .with(ARG_SOURCE_TAG_NAME, source)
        .with(ARG_TARGET_TAG_NAME, target);
    let outcome = api.run(&MergeTagsJob, args, &AuthContext::anonymous()).await?;
    outcome.decode()
}

pub async fn seed_tag(backend: &MemoryBackend, id: &str, name: &str) {
    let tag = Tag {
        tag_id: TagId::new(id),
        name: TagName::new(name),
        category: "general".to_string(),
        aliases: Vec::new(),
        created_at: 1730000000000,
    };
    let mut tx = backend.begin().await.unwrap();
    TagsProvider::create(tx.as_mut(), &tag).unwrap();
    tx.commit().unwrap();
}

pub async fn seed_post(backend: &MemoryBackend, id: &str, tag_ids: &[&str]) {
    let post = Post::new(PostId::new(id), tag_ids.iter().map(|t| TagId::new(*t)));
    let mut tx = backend.begin().await.unwrap();
    PostsProvider::save(tx.as_mut(), &post).unwrap();
    tx.commit().unwrap();
}

pub async fn load_post(backend: &MemoryBackend, id: &str) -> Option<Post> {
    let tx = backend.begin().await.unwrap();
    PostsProvider::get(tx.as_ref(), &PostId::new(id)).unwrap()
}

pub async fn load_tag_by_name(backend: &MemoryBackend, name: &str) -> Option<Tag> {
    let tx = backend.begin().await.unwrap();
    TagsProvider::find_by_name(tx.as_ref(), &TagName::new(name)).unwrap()
}

pub async fn user_count(backend: &MemoryBackend) -> usize {
    let tx = backend.begin().await.unwrap();
    plumeria_system::UsersProvider::count(tx.as_ref()).unwrap()
}

pub async fn persisted_audit_count(backend: &MemoryBackend) -> usize {
    let tx = backend.begin().await.unwrap();
    plumeria_system::AuditLogsProvider::count(tx.as_ref()).unwrap()
}
