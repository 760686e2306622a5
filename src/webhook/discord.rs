use serde::Serialize;

pub trait DiscordWebhook {
    fn to_discord_webhook(&self) -> DiscordMessage;
}

#[derive(Serialize, Debug, Clone)]
pub struct DiscordMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<DiscordMessageEmbed>,
}

impl DiscordMessage {
    pub fn new() -> DiscordMessage {
        DiscordMessage {
            embeds: vec![],
            content: None,
        }
    }

    pub fn content(self, content: &str) -> Self {
        DiscordMessage {
            embeds: self.embeds,
            content: Some(content.into()),
        }
    }

    pub fn embed(
        self,
        title: &str,
        description: Option<&str>,
        thumbnail_url: Option<&str>,
    ) -> Self {
        // Discord rejects payloads with more than 10 embeds
        if self.embeds.len() == 10 {
            return self;
        }

        let embed = DiscordMessageEmbed {
            title: String::from(title),
            description: description.map(String::from),
            thumbnail: thumbnail_url.map(|url| DiscordMessageEmbedThumbnail {
                url: String::from(url),
            }),
        };

        let mut embeds = self.embeds;
        embeds.push(embed);

        DiscordMessage {
            content: self.content,
            embeds,
        }
    }

    /// Posts the message and waits for delivery. The indexer is a one-shot
    /// job, so a detached send could be cut off by process exit. Delivery
    /// failures are logged and swallowed.
    pub async fn send(&self, url: &str) {
        if url.is_empty() {
            log::debug!("Not sending webhook since URL is empty");
            return;
        }

        log::debug!("Sending {:?} to webhook url {}", self, url);

        if let Err(e) = reqwest::Client::new().post(url).json(self).send().await {
            log::error!("Failed to broadcast Discord webhook {}: {}", url, e);
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct DiscordMessageEmbed {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<DiscordMessageEmbedThumbnail>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DiscordMessageEmbedThumbnail {
    url: String,
}
