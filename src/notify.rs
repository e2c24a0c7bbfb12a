//! Notification channel: where sealed submissions are dispatched.
use std::sync::Arc;

use async_trait::async_trait;
use canonical::SubmissionRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use ingest::{Field, Snapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{ChannelKind, NotifyConfig};

/// Flat key/value payload handed to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub email_subject: String,
    pub form_type: String,
    /// Dispatch time, RFC 3339 UTC.
    pub date: String,
    pub submission_id: String,
    pub submission_hash: String,
    pub from_name: String,
    pub user_email: String,
    pub client_body: String,
    pub internal_body: String,
}

impl NotificationPayload {
    pub fn build(snapshot: &Snapshot, record: &SubmissionRecord, sent_at: DateTime<Utc>) -> Self {
        let form_type = snapshot.kind().title().to_string();
        let from_name = snapshot.text(Field::FromName).to_string();
        Self {
            email_subject: format!(
                "{form_type}: {} — {from_name}",
                snapshot.text(Field::ProjectName)
            ),
            form_type,
            date: sent_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            submission_id: record.id().to_string(),
            submission_hash: record.fingerprint().to_string(),
            from_name,
            user_email: snapshot.text(Field::UserEmail).to_string(),
            client_body: record.client_text().to_string(),
            internal_body: record.internal_text().to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("channel rejected the payload with status {0}")]
    Status(u16),
    #[error("channel did not answer in time")]
    Timeout,
    #[error("channel `{0}` is not available in this build")]
    Unavailable(&'static str),
}

/// An external service that accepts a submission payload.
///
/// Only the success or failure of [`send`](Self::send) matters; response
/// bodies are never inspected.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}

/// Writes payloads to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        info!(
            subject = %payload.email_subject,
            submission_id = %payload.submission_id,
            submission_hash = %payload.submission_hash,
            user_email = %payload.user_email,
            internal_len = payload.internal_body.len(),
            "notification_logged"
        );
        Ok(())
    }
}

/// POSTs payloads as JSON.
#[cfg(feature = "webhook")]
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

#[cfg(feature = "webhook")]
impl WebhookChannel {
    pub fn new(
        url: impl Into<String>,
        auth_header: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            auth_header,
        })
    }
}

#[cfg(feature = "webhook")]
#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(auth) = &self.auth_header {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                NotifyError::Timeout
            } else {
                NotifyError::Transport(e.to_string())
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Builds the configured channel.
pub fn channel_from_config(
    config: &NotifyConfig,
) -> Result<Arc<dyn NotificationChannel>, NotifyError> {
    match config.channel {
        ChannelKind::Log => Ok(Arc::new(LogChannel)),
        #[cfg(feature = "webhook")]
        ChannelKind::Webhook => {
            let url = config
                .webhook_url
                .clone()
                .ok_or_else(|| NotifyError::Transport("webhook_url is not set".to_string()))?;
            Ok(Arc::new(WebhookChannel::new(
                url,
                config.auth_header.clone(),
                config.timeout(),
            )?))
        }
        #[cfg(not(feature = "webhook"))]
        ChannelKind::Webhook => Err(NotifyError::Unavailable("webhook")),
    }
}
