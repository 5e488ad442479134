//! Outbound mail seam.
//!
//! Transport is an external collaborator; this crate only owns the
//! boundary. Jobs queue mail on their [`JobContext`](crate::job::JobContext)
//! and the dispatcher hands it to the configured [`Mailer`] once per
//! successful invocation; a job that fails sends nothing.

use async_trait::async_trait;
use parking_lot::Mutex;
use plumeria_commons::models::render_template;
use plumeria_commons::{ApiResult, UserName};
use std::collections::BTreeMap;

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail transport boundary.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> ApiResult<()>;
}

/// Discards all mail. The default for embedders without a transport.
#[derive(Debug, Default)]
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, mail: Mail) -> ApiResult<()> {
        log::debug!("discarding mail to {} ({})", mail.recipient, mail.subject);
        Ok(())
    }
}

/// Records sent mail instead of delivering it. Test double.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages sent so far.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Copies of all messages sent so far.
    pub fn sent(&self) -> Vec<Mail> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: Mail) -> ApiResult<()> {
        self.sent.lock().push(mail);
        Ok(())
    }
}

/// Builds the e-mail-confirmation message for a freshly registered user.
pub fn confirmation_mail(user: &UserName, email: &str) -> Mail {
    let substitutions = BTreeMap::from([("user".to_string(), user.to_string())]);
    Mail {
        recipient: email.to_string(),
        subject: "E-mail confirmation".to_string(),
        body: render_template(
            "Hello, {user}! Please confirm your e-mail address by visiting the link from this message.",
            &substitutions,
        ),
    }
}
