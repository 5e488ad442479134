//! # plumeria-core
//!
//! Job execution and authorization framework for the Plumeria board
//! backend.
//!
//! A request becomes a typed [`Job`](job::Job) plus an
//! [`ArgumentSet`](args::ArgumentSet); the [`Api`](dispatcher::Api)
//! dispatcher validates the declared argument requirements, applies the
//! authentication / e-mail-confirmation / privilege gates, runs the job
//! inside one storage transaction and appends exactly one audit entry
//! for each completed job.
//!
//! ## Pipeline
//!
//! ```text
//! validate arguments → auth gate → e-mail gate → privilege gate
//!     → execute (one transaction) → audit entry → result
//! ```
//!
//! A job that fails any gate performs zero side effects; a job that
//! fails mid-execution rolls back atomically. Mail queued during
//! execution is dispatched once per successful invocation.

pub mod access;
pub mod args;
pub mod audit;
pub mod dispatcher;
pub mod job;
pub mod jobs;
pub mod logging;
pub mod mail;
pub mod registry;
pub mod requirements;
pub mod reverse_search;

pub use access::{assert_privilege, resolve_threshold, Privilege, RankThreshold};
pub use args::{ArgValue, ArgumentSet};
pub use audit::{AuditLog, AuditSink, FileSink, MemorySink};
pub use dispatcher::Api;
pub use job::{Job, JobContext, JobOutcome};
pub use mail::{Mail, Mailer, NullMailer, RecordingMailer};
pub use requirements::{Evaluation, Requirement};
