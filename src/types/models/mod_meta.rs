use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::manifest_json::ManifestJson;
use crate::types::serde::chrono_ts_secs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModAuthor {
    pub name: String,
    pub avatar_url: String,
    pub profile_url: String,
}

/// Lightweight listing entry. Produced fresh every run by the listing
/// client; persisted only as an invalid-mod marker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModSummary {
    pub id: u64,
    pub name: String,
    pub author: ModAuthor,
    #[serde(with = "chrono_ts_secs")]
    pub last_modified: DateTime<Utc>,
    pub screenshots: Vec<String>,
}

/// One downloadable artifact. `created_at` of the first file in a mod's
/// list is the change-detection key for the primary package.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageFile {
    pub filename: String,
    pub download_url: String,
    pub filesize: u64,
    #[serde(with = "chrono_ts_secs")]
    pub created_at: DateTime<Utc>,
    pub download_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModCategory {
    pub id: u64,
    pub name: String,
}

/// What the detail endpoint knows about a mod, before any manifest work.
#[derive(Debug, Clone, PartialEq)]
pub struct ModDetail {
    pub description: Option<String>,
    pub category: Option<ModCategory>,
    pub download_count: u64,
    pub files: Vec<PackageFile>,
}

/// The full persisted record for one mod. `files` is non-empty whenever
/// the record exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModMetadata {
    pub id: u64,
    pub name: String,
    pub author: ModAuthor,
    #[serde(with = "chrono_ts_secs")]
    pub last_modified: DateTime<Utc>,
    pub screenshots: Vec<String>,
    pub description: Option<String>,
    pub category: Option<ModCategory>,
    pub download_count: u64,
    pub files: Vec<PackageFile>,
    pub version: Option<String>,
    pub game_required_version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    pub manifest_id: Option<String>,
}

impl ModMetadata {
    /// Assembles a record from a freshly parsed manifest.
    pub fn from_manifest(summary: &ModSummary, detail: ModDetail, manifest: ManifestJson) -> Self {
        ModMetadata {
            id: summary.id,
            name: summary.name.clone(),
            author: summary.author.clone(),
            last_modified: summary.last_modified,
            screenshots: summary.screenshots.clone(),
            description: detail.description,
            category: detail.category,
            download_count: detail.download_count,
            files: detail.files,
            version: manifest.version,
            game_required_version: manifest.game_required_version,
            dependencies: manifest.dependencies,
            manifest_id: manifest.id,
        }
    }

    /// Assembles a record from fresh summary/detail data while reusing the
    /// manifest-derived fields of an earlier record whose primary package
    /// has not changed.
    pub fn carrying_manifest_of(
        summary: &ModSummary,
        detail: ModDetail,
        previous: &ModMetadata,
    ) -> Self {
        ModMetadata {
            id: summary.id,
            name: summary.name.clone(),
            author: summary.author.clone(),
            last_modified: summary.last_modified,
            screenshots: summary.screenshots.clone(),
            description: detail.description,
            category: detail.category,
            download_count: detail.download_count,
            files: detail.files,
            version: previous.version.clone(),
            game_required_version: previous.game_required_version.clone(),
            dependencies: previous.dependencies.clone(),
            manifest_id: previous.manifest_id.clone(),
        }
    }
}
