//! The job contract.
//!
//! A job is one typed, validated, authorized unit of backend work. Each
//! variant declares its argument requirements, privilege requirements
//! and gates; the dispatcher owns the surrounding pipeline. Jobs never
//! share mutable state; everything they touch arrives through the
//! [`JobContext`].

use crate::access::Privilege;
use crate::args::ArgumentSet;
use crate::mail::Mail;
use crate::requirements::Requirement;
use async_trait::async_trait;
use plumeria_auth::AuthContext;
use plumeria_commons::{ApiError, ApiResult};
use plumeria_configs::ServerConfig;
use plumeria_store::StoreTransaction;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// One typed unit of backend work.
#[async_trait]
pub trait Job: Send + Sync {
    /// Job type identifier, as used by the registry.
    fn name(&self) -> &'static str;

    /// Arguments this job needs, as a requirement expression.
    fn required_arguments(&self) -> Requirement;

    /// Main privilege gating the job, if any.
    fn required_main_privilege(&self) -> Option<Privilege> {
        None
    }

    /// Resource-scoped sub-privilege gating the job, if any.
    fn required_sub_privileges(&self) -> Option<Privilege> {
        None
    }

    /// Whether the caller must be authenticated.
    fn authentication_required(&self) -> bool {
        false
    }

    /// Whether the caller must have a confirmed e-mail address.
    fn confirmed_email_required(&self) -> bool {
        false
    }

    /// Performs the state change. Runs inside the dispatcher's
    /// transaction; on error every mutation rolls back and nothing
    /// external happens.
    async fn execute(&self, ctx: &mut JobContext<'_>) -> ApiResult<JobOutcome>;
}

/// Audit message recorded by a job: template plus substitutions.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub template: String,
    pub substitutions: BTreeMap<String, String>,
}

/// Everything a job may touch during one invocation.
///
/// Owned by the dispatcher; jobs receive a mutable borrow for the
/// duration of `execute` and may not hold on to any of it. Mail and the
/// audit message are staged here and only take effect if the job
/// succeeds.
pub struct JobContext<'a> {
    args: &'a ArgumentSet,
    auth: &'a AuthContext,
    config: &'a ServerConfig,
    tx: Box<dyn StoreTransaction>,
    outbox: Vec<Mail>,
    audit: Option<AuditRecord>,
}

impl<'a> JobContext<'a> {
    pub fn new(
        args: &'a ArgumentSet,
        auth: &'a AuthContext,
        config: &'a ServerConfig,
        tx: Box<dyn StoreTransaction>,
    ) -> Self {
        Self {
            args,
            auth,
            config,
            tx,
            outbox: Vec::new(),
            audit: None,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        self.args
    }

    pub fn auth(&self) -> &AuthContext {
        self.auth
    }

    pub fn config(&self) -> &ServerConfig {
        self.config
    }

    /// Read access to the open transaction.
    pub fn tx(&self) -> &dyn StoreTransaction {
        self.tx.as_ref()
    }

    /// Write access to the open transaction.
    pub fn tx_mut(&mut self) -> &mut dyn StoreTransaction {
        self.tx.as_mut()
    }

    /// String value of a declared argument.
    ///
    /// The dispatcher has already validated the job's requirement
    /// expression, so a miss here means the job read a key it never
    /// declared; it surfaces as the same validation error.
    pub fn require_str(&self, key: &str) -> ApiResult<&str> {
        self.args.get_str(key).ok_or_else(|| ApiError::Validation {
            missing: vec![key.to_string()],
        })
    }

    /// Stages a mail; dispatched once if and only if the job succeeds.
    pub fn queue_mail(&mut self, mail: Mail) {
        self.outbox.push(mail);
    }

    /// Records the audit message for this job. Last call wins; every
    /// completed job produces exactly one audit entry either way.
    pub fn record(
        &mut self,
        template: impl Into<String>,
        substitutions: BTreeMap<String, String>,
    ) {
        self.audit = Some(AuditRecord {
            template: template.into(),
            substitutions,
        });
    }

    /// Tears the context down for the dispatcher's commit phase.
    pub(crate) fn into_parts(self) -> (Box<dyn StoreTransaction>, Vec<Mail>, Option<AuditRecord>) {
        (self.tx, self.outbox, self.audit)
    }
}

/// JSON-serializable result of a successful job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome(serde_json::Value);

impl JobOutcome {
    /// Outcome carrying no payload.
    pub fn none() -> Self {
        Self(serde_json::Value::Null)
    }

    /// Serializes a value into an outcome.
    pub fn from_value<T: Serialize>(value: &T) -> ApiResult<Self> {
        serde_json::to_value(value)
            .map(Self)
            .map_err(|e| ApiError::internal(format!("outcome serialization error: {}", e)))
    }

    pub fn json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }

    /// Deserializes the outcome back into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| ApiError::internal(format!("outcome deserialization error: {}", e)))
    }
}
