use crate::types::api::IndexError;
use crate::types::models::mod_meta::ModSummary;
use crate::webhook::discord::{DiscordMessage, DiscordWebhook};

pub struct ModInvalidEvent {
    pub id: u64,
    pub name: String,
    pub reason: String,
}

impl ModInvalidEvent {
    pub fn from_failure(summary: &ModSummary, reason: &IndexError) -> Self {
        ModInvalidEvent {
            id: summary.id,
            name: summary.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl DiscordWebhook for ModInvalidEvent {
    fn to_discord_webhook(&self) -> DiscordMessage {
        DiscordMessage::new().embed(
            &format!("⚠️ Couldn't index {}", self.name),
            Some(&format!(
                "https://gamebanana.com/mods/{}\n\n{}",
                self.id, self.reason
            )),
            None,
        )
    }
}
