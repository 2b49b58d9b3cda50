use crate::config::Config;
use crate::schema::Notification;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("discord webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("discord webhook returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Destination for built notifications. One attempt per notification.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

pub struct DiscordClient {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            webhook_url: config.discord_webhook.clone(),
        })
    }
}

#[async_trait::async_trait]
impl NotificationSink for DiscordClient {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "embeds": [notification] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        tracing::debug!(title = %notification.title, %status, "discord: embed delivered");
        Ok(())
    }
}
