use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Outbound email delivery. Failures surface as values, never panics.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()>;
}

/// Resend HTTP API client.
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, from: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let res = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("send email request")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            anyhow::bail!("email provider returned {status}: {detail}");
        }

        debug!(%to, %subject, "email accepted by provider");
        Ok(())
    }
}

/// One message captured by [`MockMailer`].
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mailer fake: records every send and can be flipped into a failing mode.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    fail: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }

    pub fn last_sent(&self) -> Option<SentEmail> {
        self.sent.lock().expect("mailer lock").last().cloned()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("mail provider unavailable");
        }
        self.sent.lock().expect("mailer lock").push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_mailer_records_sends_in_order() {
        let mailer = MockMailer::new();
        mailer.send("a@x.com", "first", "<p>1</p>").await.expect("send");
        mailer.send("b@x.com", "second", "<p>2</p>").await.expect("send");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[1].subject, "second");
    }

    #[tokio::test]
    async fn mock_mailer_fails_when_switched() {
        let mailer = MockMailer::new();
        mailer.set_fail(true);
        assert!(mailer.send("a@x.com", "s", "h").await.is_err());
        assert!(mailer.sent().is_empty());
    }
}
