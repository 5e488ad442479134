//! Audit log entry for completed jobs.

use super::AuditLogId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Audit log entry describing one completed job.
///
/// The message is a template with named placeholders filled from
/// `substitutions` at render time; entries never carry pre-concatenated
/// strings, so structured fields stay queryable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub audit_id: AuditLogId,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// Display representation of the actor ("dummy", "anonymous user").
    pub actor: String,
    /// Template with `{name}` placeholders.
    pub template: String,
    pub substitutions: BTreeMap<String, String>,
}

impl AuditLogEntry {
    /// Renders the entry's message by substituting named placeholders.
    pub fn render(&self) -> String {
        render_template(&self.template, &self.substitutions)
    }
}

/// Substitutes `{name}` placeholders in `template` from `substitutions`.
///
/// Total: placeholders without a substitution are left in place, extra
/// substitutions are ignored.
pub fn render_template(template: &str, substitutions: &BTreeMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in substitutions {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}
