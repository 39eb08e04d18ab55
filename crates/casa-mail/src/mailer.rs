//! The mailer trait and its development implementations.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Sender identity for outgoing mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Display name, e.g. "Customer Support".
    pub from_name: String,
    /// Sender address.
    pub from_address: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            from_name: "Customer Support".to_string(),
            from_address: "support@casabook.local".to_string(),
        }
    }
}

impl SenderConfig {
    /// The RFC 5322 `From` header value.
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.from_address)
    }
}

/// Result of a send attempt.
///
/// Delivery failures are data, not errors: the caller logs and continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailOutcome {
    /// Whether the message was accepted for delivery.
    pub success: bool,
    /// Transport detail, e.g. a message id or the failure reason.
    pub message: String,
}

impl MailOutcome {
    /// A successful outcome.
    pub fn delivered(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Outbound email transport.
pub trait Mailer: Send + Sync {
    /// Send a message. Never panics, never blocks the caller on retries.
    fn send(
        &self,
        to: &str,
        subject: &str,
        text: Option<&str>,
        html: Option<&str>,
    ) -> MailOutcome;
}

/// Mailer that writes messages to the log instead of a wire.
///
/// Stands in for the real transport in development; the production
/// transport lives outside this workspace.
#[derive(Debug, Default)]
pub struct ConsoleMailer {
    sender: SenderConfig,
}

impl ConsoleMailer {
    /// Create a console mailer with the given sender identity.
    pub fn new(sender: SenderConfig) -> Self {
        Self { sender }
    }
}

impl Mailer for ConsoleMailer {
    fn send(
        &self,
        to: &str,
        subject: &str,
        text: Option<&str>,
        _html: Option<&str>,
    ) -> MailOutcome {
        tracing::info!(
            from = %self.sender.from_header(),
            to,
            subject,
            body = text.unwrap_or(""),
            "email sent"
        );
        MailOutcome::delivered(format!("logged for {to}"))
    }
}

/// A message captured by [`MemoryMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

/// Mailer that records every message in memory.
///
/// Used by tests to assert on notification behavior; can be flipped into
/// a failing mode to exercise the best-effort path.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: bool,
}

impl MemoryMailer {
    /// Create a recording mailer that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording mailer that rejects every message.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages captured so far.
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(
        &self,
        to: &str,
        subject: &str,
        text: Option<&str>,
        html: Option<&str>,
    ) -> MailOutcome {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                text: text.map(str::to_string),
                html: html.map(str::to_string),
            });
        }
        if self.fail {
            MailOutcome::failed("transport unavailable")
        } else {
            MailOutcome::delivered(format!("recorded for {to}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_mailer_records_messages() {
        let mailer = MemoryMailer::new();
        let outcome = mailer.send("a@example.com", "Hello", Some("body"), None);

        assert!(outcome.success);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[0].subject, "Hello");
    }

    #[test]
    fn test_failing_mailer_still_records() {
        let mailer = MemoryMailer::failing();
        let outcome = mailer.send("a@example.com", "Hello", None, None);

        assert!(!outcome.success);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[test]
    fn test_from_header_format() {
        let sender = SenderConfig {
            from_name: "Customer Support".to_string(),
            from_address: "support@example.com".to_string(),
        };
        assert_eq!(
            sender.from_header(),
            "\"Customer Support\" <support@example.com>"
        );
    }
}
