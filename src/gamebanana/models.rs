//! Typed request/response shapes for the GameBanana v11 API. The wire uses
//! Hungarian-prefixed keys (`_idRow`, `_sName`, `_tsDateModified`); these
//! structs validate payloads at the boundary and convert into the domain
//! records the rest of the indexer works with.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::models::mod_meta::{
    ModAuthor, ModCategory, ModDetail, ModSummary, PackageFile,
};
use crate::types::serde::chrono_ts_secs;

#[derive(Deserialize, Debug)]
pub struct SubfeedPage {
    #[serde(rename = "_aMetadata")]
    pub metadata: SubfeedMetadata,
    #[serde(rename = "_aRecords", default)]
    pub records: Vec<SubfeedRecord>,
}

#[derive(Deserialize, Debug)]
pub struct SubfeedMetadata {
    #[serde(rename = "_bIsComplete")]
    pub is_complete: bool,
}

#[derive(Deserialize, Debug)]
pub struct SubfeedRecord {
    #[serde(rename = "_idRow")]
    pub id: u64,
    #[serde(rename = "_sName")]
    pub name: String,
    #[serde(rename = "_aSubmitter")]
    pub submitter: SubmitterRecord,
    #[serde(rename = "_tsDateModified", with = "chrono_ts_secs")]
    pub date_modified: DateTime<Utc>,
    #[serde(rename = "_aPreviewMedia", default)]
    pub preview_media: PreviewMedia,
}

#[derive(Deserialize, Debug)]
pub struct SubmitterRecord {
    #[serde(rename = "_sName")]
    pub name: String,
    #[serde(rename = "_sAvatarUrl", default)]
    pub avatar_url: String,
    #[serde(rename = "_sProfileUrl", default)]
    pub profile_url: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct PreviewMedia {
    #[serde(rename = "_aImages", default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Deserialize, Debug)]
pub struct PreviewImage {
    #[serde(rename = "_sBaseUrl")]
    pub base_url: String,
    #[serde(rename = "_sFile")]
    pub file: String,
}

impl From<SubfeedRecord> for ModSummary {
    fn from(record: SubfeedRecord) -> Self {
        ModSummary {
            id: record.id,
            name: record.name,
            author: ModAuthor {
                name: record.submitter.name,
                avatar_url: record.submitter.avatar_url,
                profile_url: record.submitter.profile_url,
            },
            last_modified: record.date_modified,
            screenshots: record
                .preview_media
                .images
                .into_iter()
                .map(|image| format!("{}/{}", image.base_url, image.file))
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ModProfile {
    #[serde(rename = "_sDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "_aCategory", default)]
    pub category: Option<CategoryRecord>,
    #[serde(rename = "_nDownloadCount", default)]
    pub download_count: u64,
    #[serde(rename = "_aFiles", default)]
    pub files: Vec<FileRecord>,
}

#[derive(Deserialize, Debug)]
pub struct CategoryRecord {
    #[serde(rename = "_idRow")]
    pub id: u64,
    #[serde(rename = "_sName")]
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct FileRecord {
    #[serde(rename = "_sFile")]
    pub filename: String,
    #[serde(rename = "_sDownloadUrl")]
    pub download_url: String,
    #[serde(rename = "_nFilesize", default)]
    pub filesize: u64,
    #[serde(rename = "_tsDateAdded", with = "chrono_ts_secs")]
    pub date_added: DateTime<Utc>,
    #[serde(rename = "_nDownloadCount", default)]
    pub download_count: u64,
}

impl From<ModProfile> for ModDetail {
    fn from(profile: ModProfile) -> Self {
        ModDetail {
            description: profile.description,
            category: profile.category.map(|c| ModCategory {
                id: c.id,
                name: c.name,
            }),
            download_count: profile.download_count,
            files: profile
                .files
                .into_iter()
                .map(|file| PackageFile {
                    filename: file.filename,
                    download_url: file.download_url,
                    filesize: file.filesize,
                    created_at: file.date_added,
                    download_count: file.download_count,
                })
                .collect(),
        }
    }
}
