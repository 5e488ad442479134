//! Static job registry.
//!
//! Maps a job type identifier to a constructor, resolved before any
//! validation begins. The set of job types is closed at compile time;
//! unknown identifiers surface as a not-found at the invoke boundary.

use crate::job::Job;
use crate::jobs::{MergeTagsJob, RegisterUserJob};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

type JobFactory = fn() -> Box<dyn Job>;

fn make_register_user() -> Box<dyn Job> {
    Box::new(RegisterUserJob)
}

fn make_merge_tags() -> Box<dyn Job> {
    Box::new(MergeTagsJob)
}

static JOB_REGISTRY: Lazy<BTreeMap<&'static str, JobFactory>> = Lazy::new(|| {
    BTreeMap::from([
        (RegisterUserJob::TYPE, make_register_user as JobFactory),
        (MergeTagsJob::TYPE, make_merge_tags as JobFactory),
    ])
});

/// Builds the job registered under a type identifier.
pub fn resolve_job(job_type: &str) -> Option<Box<dyn Job>> {
    JOB_REGISTRY.get(job_type).map(|factory| factory())
}

/// All registered job type identifiers, sorted.
pub fn registered_job_types() -> Vec<&'static str> {
    JOB_REGISTRY.keys().copied().collect()
}
