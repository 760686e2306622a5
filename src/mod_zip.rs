use std::io::Cursor;

use bytes::Bytes;
use zip::ZipArchive;

use crate::gamebanana::retry::RetryPolicy;
use crate::types::api::IndexError;

/// Downloads a mod package into memory, retrying transient failures.
/// Failure here is recoverable at the caller; the mod is marked invalid for
/// the run instead of aborting it.
pub async fn download_package(
    client: &reqwest::Client,
    policy: &RetryPolicy,
    url: &str,
    limit_mb: u32,
) -> Result<Bytes, IndexError> {
    policy
        .run(&format!("package download {}", url), || {
            download(client, url, limit_mb)
        })
        .await
        .map_err(IndexError::ManifestFetchFailed)
}

async fn download(client: &reqwest::Client, url: &str, limit_mb: u32) -> Result<Bytes, String> {
    let limit_bytes = limit_mb as u64 * 1_000_000;
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| format!("couldn't download package: {}", e))?;

    let len = response
        .content_length()
        .ok_or("couldn't determine package file size".to_string())?;

    if len > limit_bytes {
        return Err(format!(
            "package is too large ({} bytes, max {}MB)",
            len, limit_mb
        ));
    }

    response
        .bytes()
        .await
        .map_err(|e| format!("couldn't read package bytes: {}", e))
}

pub fn bytes_to_ziparchive(bytes: Bytes) -> Result<ZipArchive<Cursor<Bytes>>, IndexError> {
    ZipArchive::new(Cursor::new(bytes))
        .inspect_err(|e| log::error!("Failed to create ZipArchive: {}", e))
        .map_err(|e| IndexError::ManifestFetchFailed(format!("couldn't read archive: {}", e)))
}

/// Position of the first entry whose path contains `token`
/// case-insensitively, in archive entry order.
pub fn find_descriptor_entry(names: &[String], token: &str) -> Option<usize> {
    let token = token.to_lowercase();
    names
        .iter()
        .position(|name| name.to_lowercase().contains(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_by_containment_ignoring_case() {
        let entries = names(&["art/icon.png", "SomeMod/MANIFEST.json", "notes.txt"]);
        assert_eq!(find_descriptor_entry(&entries, "manifest.json"), Some(1));
    }

    #[test]
    fn first_match_in_entry_order_wins() {
        let entries = names(&["z/manifest.json", "a/manifest.json"]);
        assert_eq!(find_descriptor_entry(&entries, "manifest.json"), Some(0));
    }

    #[test]
    fn no_match_is_none() {
        let entries = names(&["mod.package", "thumbnail.jpg"]);
        assert_eq!(find_descriptor_entry(&entries, "manifest.json"), None);
    }
}
