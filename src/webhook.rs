use crate::events::mod_created::{ModCreatedEvent, ModUpdatedEvent};
use crate::events::mod_invalid::ModInvalidEvent;
use crate::types::api::IndexError;
use crate::types::models::mod_meta::{ModMetadata, ModSummary};
use crate::webhook::discord::{DiscordMessage, DiscordWebhook};

pub mod discord;

/// Where change notifications go. The sync run calls these at well-defined
/// points; implementations own delivery, formatting and failure handling.
/// Notification failures never fail the run.
#[allow(async_fn_in_trait)]
pub trait Notify {
    async fn publish_created(&self, meta: &ModMetadata);
    async fn publish_updated(&self, old: &ModMetadata, new: &ModMetadata);
    async fn publish_invalid(&self, summary: &ModSummary, reason: &IndexError);
    async fn publish_progress(&self, message: &str);
    async fn publish_run_outcome(&self, success: bool, detail: &str);
}

pub struct DiscordNotifier {
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: &str) -> Self {
        DiscordNotifier {
            webhook_url: webhook_url.to_string(),
        }
    }
}

impl Notify for DiscordNotifier {
    async fn publish_created(&self, meta: &ModMetadata) {
        ModCreatedEvent::from(meta)
            .to_discord_webhook()
            .send(&self.webhook_url)
            .await;
    }

    async fn publish_updated(&self, old: &ModMetadata, new: &ModMetadata) {
        ModUpdatedEvent::from_pair(old, new)
            .to_discord_webhook()
            .send(&self.webhook_url)
            .await;
    }

    async fn publish_invalid(&self, summary: &ModSummary, reason: &IndexError) {
        ModInvalidEvent::from_failure(summary, reason)
            .to_discord_webhook()
            .send(&self.webhook_url)
            .await;
    }

    async fn publish_progress(&self, message: &str) {
        DiscordMessage::new()
            .content(message)
            .send(&self.webhook_url)
            .await;
    }

    async fn publish_run_outcome(&self, success: bool, detail: &str) {
        let content = if success {
            format!("✅ Index sync finished: {}", detail)
        } else {
            format!("❌ Index sync failed: {}", detail)
        };
        DiscordMessage::new()
            .content(&content)
            .send(&self.webhook_url)
            .await;
    }
}
