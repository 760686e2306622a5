use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::models::{ModProfile, SubfeedPage};
use super::retry::RetryPolicy;
use crate::config::AppData;
use crate::types::api::IndexError;
use crate::types::models::mod_meta::{ModDetail, ModSummary};

pub struct GameBananaClient {
    client: Client,
    base_url: String,
    game_id: u64,
    page_size: u32,
    policy: RetryPolicy,
}

impl GameBananaClient {
    pub fn new(data: &AppData) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        GameBananaClient {
            client,
            base_url: data.api_base_url().trim_end_matches('/').to_string(),
            game_id: data.game_id(),
            page_size: data.page_size(),
            policy: RetryPolicy::new(
                data.retry_attempts(),
                Duration::from_secs(data.retry_delay_secs()),
            ),
        }
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Walks the game's mod subfeed page by page until the server signals
    /// completion, collecting every record's summary. Retry exhaustion on
    /// any page aborts the whole run; a partial listing would make the
    /// missing mods look deleted.
    pub async fn fetch_all_summaries(&self) -> Result<Vec<ModSummary>, IndexError> {
        let mut summaries: Vec<ModSummary> = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/Game/{}/Subfeed?_nPage={}&_nPerpage={}&_csvModelInclusions=Mod",
                self.base_url, self.game_id, page, self.page_size
            );
            log::info!("Fetching listing page {}", page);

            let subfeed: SubfeedPage = self
                .get_json(&url)
                .await
                .map_err(IndexError::FetchFailed)?;

            // The completion flag is authoritative, but an empty page also
            // terminates in case the server omits the flag.
            let complete = subfeed.metadata.is_complete || subfeed.records.is_empty();
            summaries.extend(subfeed.records.into_iter().map(ModSummary::from));

            if complete {
                return Ok(summaries);
            }
            page += 1;
        }
    }

    /// Fetches one mod's profile: description, category, download count and
    /// file list. Retry exhaustion here is recoverable at the caller.
    pub async fn fetch_mod_detail(&self, id: u64) -> Result<ModDetail, IndexError> {
        let url = format!(
            "{}/Mod/{}?_csvProperties=_sDescription,_aCategory,_nDownloadCount,_aFiles",
            self.base_url, id
        );

        let profile: ModProfile = self
            .get_json(&url)
            .await
            .map_err(IndexError::DetailFetchFailed)?;

        Ok(ModDetail::from(profile))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let client = &self.client;
        self.policy
            .run(&format!("GET {}", url), || async move {
                client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| format!("request failed: {}", e))?
                    .json::<T>()
                    .await
                    .map_err(|e| format!("unexpected response body: {}", e))
            })
            .await
    }
}
