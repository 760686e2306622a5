use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::mod_meta::{ModMetadata, ModSummary};

/// The full persisted index state. Rebuilt from scratch every run and
/// written out atomically once the run has finished.
///
/// `id_to_index` maps a mod id to its position in `mod_metas`; positions
/// are stable only within one snapshot. `invalid_mods` keeps the summaries
/// of mods that failed metadata resolution so a repeat failure can be
/// detected without refetching next run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub id_to_index: HashMap<u64, usize>,
    pub mod_metas: Vec<ModMetadata>,
    #[serde(default)]
    pub invalid_mods: Vec<ModSummary>,
}

impl Snapshot {
    pub fn record(&self, id: u64) -> Option<&ModMetadata> {
        // .get() on the index guards against a hand-edited snapshot file
        // whose positions no longer line up
        self.id_to_index
            .get(&id)
            .and_then(|&index| self.mod_metas.get(index))
    }

    pub fn invalid_entry(&self, id: u64) -> Option<&ModSummary> {
        self.invalid_mods.iter().find(|summary| summary.id == id)
    }

    /// Appends a record at the next index, keeping `id_to_index` in step.
    pub fn insert(&mut self, meta: ModMetadata) {
        self.id_to_index.insert(meta.id, self.mod_metas.len());
        self.mod_metas.push(meta);
    }

    pub fn contains(&self, id: u64) -> bool {
        self.id_to_index.contains_key(&id) || self.invalid_entry(id).is_some()
    }
}

/// The per-run diff consumed once by the notifier. Entries are ordered
/// oldest-to-newest as the reconciler walks the listing.
#[derive(Debug, Clone, Default)]
pub struct ChangeReport {
    pub created: Vec<ModMetadata>,
    pub updated: Vec<(ModMetadata, ModMetadata)>,
}

impl ChangeReport {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::types::models::mod_meta::{ModAuthor, PackageFile};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn meta(id: u64) -> ModMetadata {
        ModMetadata {
            id,
            name: format!("Mod {}", id),
            author: ModAuthor {
                name: "someone".into(),
                avatar_url: String::new(),
                profile_url: String::new(),
            },
            last_modified: ts(100),
            screenshots: vec![],
            description: None,
            category: None,
            download_count: 0,
            files: vec![PackageFile {
                filename: "mod.zip".into(),
                download_url: String::new(),
                filesize: 1,
                created_at: ts(10),
                download_count: 0,
            }],
            version: None,
            game_required_version: None,
            dependencies: Default::default(),
            manifest_id: None,
        }
    }

    #[test]
    fn insert_keeps_index_in_step() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(meta(7));
        snapshot.insert(meta(3));

        assert_eq!(snapshot.record(3).unwrap().id, 3);
        assert_eq!(snapshot.id_to_index[&7], 0);
        assert_eq!(snapshot.id_to_index[&3], 1);
        assert!(snapshot.record(42).is_none());
    }

    #[test]
    fn record_survives_out_of_range_index() {
        let mut snapshot = Snapshot::default();
        snapshot.id_to_index.insert(9, 5);
        assert!(snapshot.record(9).is_none());
    }
}
