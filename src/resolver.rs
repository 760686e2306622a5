use crate::gamebanana::GameBananaClient;
use crate::mod_zip;
use crate::types::api::IndexError;
use crate::types::manifest_json::ManifestJson;
use crate::types::models::mod_meta::{ModDetail, ModMetadata, ModSummary, PackageFile};

/// The two expensive lookups behind metadata resolution. The reconciler and
/// resolver only see this seam, so tests can substitute fakes and assert on
/// call counts.
#[allow(async_fn_in_trait)]
pub trait ModFetcher {
    async fn fetch_detail(&self, id: u64) -> Result<ModDetail, IndexError>;
    async fn fetch_manifest(&self, file: &PackageFile) -> Result<ManifestJson, IndexError>;
}

/// Production fetcher: detail from the GameBanana API, manifest by
/// downloading and unzipping the package.
pub struct LiveFetcher<'a> {
    client: &'a GameBananaClient,
    max_download_mb: u32,
}

impl<'a> LiveFetcher<'a> {
    pub fn new(client: &'a GameBananaClient, max_download_mb: u32) -> Self {
        LiveFetcher {
            client,
            max_download_mb,
        }
    }
}

impl ModFetcher for LiveFetcher<'_> {
    async fn fetch_detail(&self, id: u64) -> Result<ModDetail, IndexError> {
        self.client.fetch_mod_detail(id).await
    }

    async fn fetch_manifest(&self, file: &PackageFile) -> Result<ManifestJson, IndexError> {
        let bytes = mod_zip::download_package(
            self.client.http(),
            self.client.policy(),
            &file.download_url,
            self.max_download_mb,
        )
        .await?;
        ManifestJson::from_archive(bytes)
    }
}

/// Builds the complete metadata record for one listed mod.
///
/// The detail fetch is always needed (files and download counts move
/// independently of the manifest), but the manifest fetch means downloading
/// the whole package — by far the most expensive step in the pipeline. When
/// the primary file's creation timestamp matches the previous record's, the
/// package cannot have changed and the manifest-derived fields are reused
/// verbatim.
pub async fn resolve<F: ModFetcher>(
    fetcher: &F,
    previous: Option<&ModMetadata>,
    summary: &ModSummary,
) -> Result<ModMetadata, IndexError> {
    let detail = fetcher.fetch_detail(summary.id).await?;

    let primary = detail.files.first().ok_or_else(|| {
        IndexError::DetailFetchFailed(format!("mod {} has no downloadable files", summary.id))
    })?;

    if let Some(prev) = previous {
        if let Some(prev_primary) = prev.files.first() {
            if prev_primary.created_at == primary.created_at {
                log::debug!(
                    "mod {} primary package unchanged, skipping manifest fetch",
                    summary.id
                );
                return Ok(ModMetadata::carrying_manifest_of(summary, detail, prev));
            }
        }
    }

    let manifest = fetcher.fetch_manifest(primary).await?;
    Ok(ModMetadata::from_manifest(summary, detail, manifest))
}
