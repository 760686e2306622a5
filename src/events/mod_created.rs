use crate::types::models::mod_meta::ModMetadata;
use crate::webhook::discord::{DiscordMessage, DiscordWebhook};

pub struct ModCreatedEvent {
    pub id: u64,
    pub name: String,
    pub version: Option<String>,
    pub author_name: String,
    pub author_profile_url: String,
    pub thumbnail: Option<String>,
}

impl From<&ModMetadata> for ModCreatedEvent {
    fn from(meta: &ModMetadata) -> Self {
        ModCreatedEvent {
            id: meta.id,
            name: meta.name.clone(),
            version: meta.version.clone(),
            author_name: meta.author.name.clone(),
            author_profile_url: meta.author.profile_url.clone(),
            thumbnail: meta.screenshots.first().cloned(),
        }
    }
}

impl DiscordWebhook for ModCreatedEvent {
    fn to_discord_webhook(&self) -> DiscordMessage {
        DiscordMessage::new().embed(
            &format!(
                "🎉 New mod: {} {}",
                self.name,
                self.version.as_deref().unwrap_or("")
            ),
            Some(&format!(
                "https://gamebanana.com/mods/{}\n\nBy [{}]({})",
                self.id, self.author_name, self.author_profile_url
            )),
            self.thumbnail.as_deref(),
        )
    }
}

pub struct ModUpdatedEvent {
    pub id: u64,
    pub name: String,
    pub old_version: Option<String>,
    pub new_version: Option<String>,
    pub author_name: String,
    pub author_profile_url: String,
    pub thumbnail: Option<String>,
}

impl ModUpdatedEvent {
    pub fn from_pair(old: &ModMetadata, new: &ModMetadata) -> Self {
        ModUpdatedEvent {
            id: new.id,
            name: new.name.clone(),
            old_version: old.version.clone(),
            new_version: new.version.clone(),
            author_name: new.author.name.clone(),
            author_profile_url: new.author.profile_url.clone(),
            thumbnail: new.screenshots.first().cloned(),
        }
    }
}

impl DiscordWebhook for ModUpdatedEvent {
    fn to_discord_webhook(&self) -> DiscordMessage {
        let version_line = match (&self.old_version, &self.new_version) {
            (Some(old), Some(new)) if old != new => format!("{} → {}", old, new),
            (_, Some(new)) => new.clone(),
            _ => String::from("updated"),
        };

        DiscordMessage::new().embed(
            &format!("⬆️ Updated {} ({})", self.name, version_line),
            Some(&format!(
                "https://gamebanana.com/mods/{}\n\nBy [{}]({})",
                self.id, self.author_name, self.author_profile_url
            )),
            self.thumbnail.as_deref(),
        )
    }
}
