//! The dispatcher: validation, gates, transactional execution, audit.

use crate::access::assert_privilege;
use crate::args::ArgumentSet;
use crate::audit::{AuditLog, AuditSink};
use crate::job::{Job, JobContext, JobOutcome};
use crate::mail::Mailer;
use crate::registry;
use plumeria_auth::AuthContext;
use plumeria_commons::{ApiError, ApiResult, AuditLogEntry};
use plumeria_configs::ServerConfig;
use plumeria_store::StorageBackend;
use plumeria_system::AuditLogsProvider;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Orchestrates job execution.
///
/// Fails closed at every stage: a request that does not survive
/// validation or authorization performs zero side effects, and a request
/// that fails mid-execution rolls back atomically. Each completed job
/// leaves exactly one audit entry.
pub struct Api {
    backend: Arc<dyn StorageBackend>,
    config: Arc<ServerConfig>,
    mailer: Arc<dyn Mailer>,
    audit: AuditLog,
}

impl Api {
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        config: Arc<ServerConfig>,
        mailer: Arc<dyn Mailer>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            backend,
            config,
            mailer,
            audit: AuditLog::new(audit_sink),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs one job through the full pipeline.
    ///
    /// 1. Evaluate the job's argument requirements; missing keys fail
    ///    with `Validation` before anything else happens.
    /// 2. Authentication gate.
    /// 3. Confirmed-e-mail gate.
    /// 4. Main and sub-privilege gates against configured thresholds.
    /// 5. Execute inside a single transaction; errors roll back and
    ///    propagate unchanged.
    /// 6. Append one audit entry (same transaction), dispatch staged
    ///    mail, commit, flush the audit line.
    pub async fn run(
        &self,
        job: &dyn Job,
        args: ArgumentSet,
        auth: &AuthContext,
    ) -> ApiResult<JobOutcome> {
        let evaluation = job.required_arguments().evaluate(&args);
        if !evaluation.satisfied {
            return Err(ApiError::Validation {
                missing: evaluation.missing,
            });
        }

        if job.authentication_required() && !auth.is_authenticated() {
            return Err(ApiError::Authentication);
        }

        if job.confirmed_email_required() && !auth.has_confirmed_email() {
            return Err(ApiError::UnconfirmedEmail);
        }

        if let Some(privilege) = job.required_main_privilege() {
            assert_privilege(&self.config, auth, &privilege)?;
        }
        if let Some(privilege) = job.required_sub_privileges() {
            assert_privilege(&self.config, auth, &privilege)?;
        }

        let tx = self.backend.begin().await?;
        let mut ctx = JobContext::new(&args, auth, &self.config, tx);

        let outcome = match job.execute(&mut ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("job {} failed: {}", job.name(), e);
                // ctx drops here; the transaction rolls back.
                return Err(e);
            }
        };

        let (mut tx, outbox, record) = ctx.into_parts();

        let (template, mut substitutions) = match record {
            Some(record) => (record.template, record.substitutions),
            None => (
                "{user} ran {job}".to_string(),
                BTreeMap::from([("job".to_string(), job.name().to_string())]),
            ),
        };
        substitutions
            .entry("user".to_string())
            .or_insert_with(|| auth.actor_name());

        let entry = AuditLogEntry {
            audit_id: AuditLogsProvider::next_id(tx.as_mut())?,
            timestamp: chrono::Utc::now().timestamp_millis(),
            actor: auth.actor_name(),
            template,
            substitutions,
        };
        AuditLogsProvider::append(tx.as_mut(), &entry)?;

        // Staged mail goes out before commit: a failed send aborts the
        // whole job, so a successful response always means the side
        // effects happened and a failure means none did.
        for mail in outbox {
            self.mailer.send(mail).await?;
        }

        tx.commit()?;

        self.audit.append(entry);
        self.audit.flush()?;

        log::info!("job {} completed for {}", job.name(), auth.actor_name());
        Ok(outcome)
    }

    /// String-argument invocation surface for the (external) routing
    /// layer: resolves the job type, coerces arguments, runs, and maps
    /// the result to a JSON body plus HTTP status.
    pub async fn invoke(
        &self,
        job_type: &str,
        arguments: &BTreeMap<String, String>,
        auth: &AuthContext,
    ) -> (serde_json::Value, u16) {
        let Some(job) = registry::resolve_job(job_type) else {
            let err = ApiError::not_found(format!("Unknown job type '{}'", job_type));
            return (error_body(&err), err.http_status());
        };

        let mut args = ArgumentSet::new();
        for (key, value) in arguments {
            args = args.with(key.as_str(), value.as_str());
        }

        match self.run(job.as_ref(), args, auth).await {
            Ok(outcome) => (outcome.into_json(), 200),
            Err(err) => (error_body(&err), err.http_status()),
        }
    }
}

fn error_body(err: &ApiError) -> serde_json::Value {
    json!({
        "kind": err.kind(),
        "message": err.to_string(),
    })
}
