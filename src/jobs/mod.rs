use crate::config::AppData;
use crate::webhook::DiscordNotifier;

pub mod sync_index;

pub async fn start_job(name: &str, data: &AppData) -> Result<(), String> {
    match name {
        "sync_index" => {
            let notifier = DiscordNotifier::new(data.webhook_url());
            sync_index::start(data, &notifier)
                .await
                .map_err(|e| e.to_string())
        }
        _ => Err(format!("Job not found {}", name)),
    }
}
