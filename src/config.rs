use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct AppData {
    game_id: u64,
    page_size: u32,
    api_base_url: String,
    index_path: PathBuf,
    min_index_path: PathBuf,
    webhook_url: String,
    max_download_mb: u32,
    retry_attempts: u32,
    retry_delay_secs: u64,
}

pub fn build_config() -> anyhow::Result<AppData> {
    let game_id = dotenvy::var("GB_GAME_ID")
        .unwrap_or("19773".to_string())
        .parse::<u64>()?;
    let page_size = dotenvy::var("GB_PAGE_SIZE")
        .unwrap_or("50".to_string())
        .parse::<u32>()
        .unwrap_or(50);
    let api_base_url =
        dotenvy::var("GB_API_URL").unwrap_or("https://gamebanana.com/apiv11".to_string());
    let index_path = dotenvy::var("INDEX_PATH").unwrap_or("index.json".to_string());
    let min_index_path = dotenvy::var("MIN_INDEX_PATH").unwrap_or("index.min.json".to_string());
    let webhook_url = dotenvy::var("DISCORD_WEBHOOK_URL").unwrap_or("".to_string());
    let max_download_mb = dotenvy::var("MAX_MOD_FILESIZE_MB")
        .unwrap_or("250".to_string())
        .parse::<u32>()
        .unwrap_or(250);
    let retry_attempts = dotenvy::var("FETCH_RETRY_ATTEMPTS")
        .unwrap_or("3".to_string())
        .parse::<u32>()
        .unwrap_or(3);
    let retry_delay_secs = dotenvy::var("FETCH_RETRY_DELAY_SECS")
        .unwrap_or("5".to_string())
        .parse::<u64>()
        .unwrap_or(5);

    Ok(AppData {
        game_id,
        page_size,
        api_base_url,
        index_path: PathBuf::from(index_path),
        min_index_path: PathBuf::from(min_index_path),
        webhook_url,
        max_download_mb,
        retry_attempts,
        retry_delay_secs,
    })
}

impl AppData {
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn min_index_path(&self) -> &Path {
        &self.min_index_path
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn max_download_mb(&self) -> u32 {
        self.max_download_mb
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    pub fn retry_delay_secs(&self) -> u64 {
        self.retry_delay_secs
    }
}
