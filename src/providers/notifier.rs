//! Console notifier.
//!
//! Prints the report to stdout in place of a real email integration.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::Notifier;

/// Notification stub that renders the email to the console.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()> {
        println!("\n=== Email Sent ===");
        println!("To: {}", recipients.join(", "));
        println!("Subject: {subject}");
        println!("Body:\n{body}");

        info!(
            subject,
            recipients = recipients.len(),
            "Notification delivered (console)"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "console-notifier"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
