use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Deserialize;

use crate::mod_zip;
use crate::types::api::IndexError;

/// Descriptor filename token, matched case-insensitively against archive
/// entry paths.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// The descriptor embedded in a mod's package archive. Authors hand-write
/// these, so every key is optional and unknown keys are ignored; a missing
/// key is an empty field, not an error.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ManifestJson {
    #[serde(rename = "Id")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Version")]
    pub version: Option<String>,
    #[serde(rename = "ModAuthor")]
    pub author: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Icon")]
    pub icon: Option<String>,
    #[serde(rename = "GameRequiredVersion")]
    pub game_required_version: Option<String>,
    #[serde(rename = "Dependencies", default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(rename = "AssetReplacements", default)]
    pub asset_replacements: BTreeMap<String, String>,
}

impl ManifestJson {
    /// Scans a downloaded package archive for the descriptor and parses it.
    /// The first entry (in archive order) whose path contains
    /// `manifest.json` case-insensitively wins.
    pub fn from_archive(bytes: Bytes) -> Result<ManifestJson, IndexError> {
        let mut archive = mod_zip::bytes_to_ziparchive(bytes)?;

        let mut names: Vec<String> = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            if let Ok(file) = archive.by_index_raw(i) {
                names.push(file.name().to_string());
            } else {
                names.push(String::new());
            }
        }

        let index = mod_zip::find_descriptor_entry(&names, MANIFEST_FILE_NAME)
            .ok_or_else(|| IndexError::ManifestNotFound(MANIFEST_FILE_NAME.to_string()))?;

        let file = archive.by_index(index).map_err(|e| {
            log::error!("Failed to open {}: {}", names[index], e);
            IndexError::ManifestFetchFailed(format!("couldn't read {}", names[index]))
        })?;

        serde_json::from_reader(file).map_err(|e| {
            log::error!("Failed to parse {}: {}", names[index], e);
            IndexError::ManifestFetchFailed(format!("invalid {}: {}", names[index], e))
        })
    }
}
