//! Verification Mailer
//!
//! Channel-backed [`VerificationNotifier`]. Requests push onto an unbounded
//! queue and return immediately; a background task drains it. The default
//! sink writes each message to the log, which is what development and the
//! test suite rely on.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::notification::VerificationNotifier;
use crate::domain::value_object::email::Email;

/// A queued verification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub to: String,
    pub link: String,
}

#[derive(Clone)]
pub struct ChannelMailer {
    tx: UnboundedSender<VerificationEmail>,
}

impl ChannelMailer {
    /// Mailer plus the receiving end of its queue
    pub fn channel() -> (Self, UnboundedReceiver<VerificationEmail>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Mailer whose queue is drained into the log by a spawned task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_log_sink() -> Self {
        let (mailer, mut rx) = Self::channel();

        tokio::spawn(async move {
            while let Some(email) = rx.recv().await {
                tracing::info!(
                    to = %email.to,
                    link = %email.link,
                    "Email verification required"
                );
            }
            tracing::debug!("Verification mail sink closed");
        });

        mailer
    }
}

impl VerificationNotifier for ChannelMailer {
    fn send_verification(&self, to: &Email, link: &str) {
        let email = VerificationEmail {
            to: to.as_str().to_string(),
            link: link.to_string(),
        };

        if self.tx.send(email).is_err() {
            tracing::warn!(to = %to, "Verification mail queue closed, message dropped");
        }
    }
}
