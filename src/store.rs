use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::api::IndexError;
use crate::types::models::mod_meta::ModMetadata;
use crate::types::models::snapshot::Snapshot;

/// Loads and persists the on-disk index. Two files are written per run:
/// the full pretty-printed form (everything, including invalid-mod
/// markers) and a compact minified form for public consumption that only
/// carries the current valid mods.
pub struct SnapshotStore {
    index_path: PathBuf,
    min_index_path: PathBuf,
}

/// The public index: same content as [`Snapshot`] minus `invalid_mods`.
#[derive(Serialize)]
struct MinifiedIndex<'a> {
    id_to_index: &'a HashMap<u64, usize>,
    mod_metas: &'a [ModMetadata],
}

impl SnapshotStore {
    pub fn new(index_path: &Path, min_index_path: &Path) -> Self {
        SnapshotStore {
            index_path: index_path.to_path_buf(),
            min_index_path: min_index_path.to_path_buf(),
        }
    }

    /// Reads the previous snapshot. Any failure (missing file, unreadable
    /// file, bad JSON) is a cold start, never an error: the indexer must be
    /// able to bootstrap from nothing.
    pub fn load(&self) -> Option<Snapshot> {
        if !self.index_path.exists() {
            log::info!("No snapshot at {}, cold start", self.index_path.display());
            return None;
        }

        let data = match fs::read_to_string(&self.index_path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!(
                    "Couldn't read snapshot {}, treating as cold start: {}",
                    self.index_path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_str::<Snapshot>(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!(
                    "Couldn't parse snapshot {}, treating as cold start: {}",
                    self.index_path.display(),
                    e
                );
                None
            }
        }
    }

    /// Writes both index forms. Each file goes to a `.tmp` sibling first
    /// and is renamed into place, so a failure at any point leaves the
    /// previous on-disk state intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), IndexError> {
        let full = serde_json::to_string_pretty(snapshot)
            .map_err(|e| IndexError::SnapshotWrite(format!("couldn't serialize index: {}", e)))?;
        let minified = serde_json::to_string(&MinifiedIndex {
            id_to_index: &snapshot.id_to_index,
            mod_metas: &snapshot.mod_metas,
        })
        .map_err(|e| IndexError::SnapshotWrite(format!("couldn't serialize index: {}", e)))?;

        write_atomically(&self.index_path, &full)?;
        write_atomically(&self.min_index_path, &minified)?;

        log::info!(
            "Saved snapshot with {} mods ({} invalid) to {}",
            snapshot.mod_metas.len(),
            snapshot.invalid_mods.len(),
            self.index_path.display()
        );
        Ok(())
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), IndexError> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|e| {
        IndexError::SnapshotWrite(format!("couldn't write {}: {}", tmp_path.display(), e))
    })?;
    fs::rename(&tmp_path, path).map_err(|e| {
        IndexError::SnapshotWrite(format!("couldn't move {} into place: {}", path.display(), e))
    })
}
