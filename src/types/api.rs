use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// Listing page retry exhaustion. Fatal for the whole run: an
    /// incomplete listing would make mods appear silently deleted.
    FetchFailed(String),
    /// Detail endpoint retry exhaustion. Local to one mod.
    DetailFetchFailed(String),
    /// Package download retry exhaustion, unreadable archive or
    /// undecodable descriptor. Local to one mod.
    ManifestFetchFailed(String),
    /// Archive retrieved but no descriptor entry present. The mod has no
    /// valid manifest for this run.
    ManifestNotFound(String),
    SnapshotWrite(String),
}

impl Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchFailed(message) => write!(f, "listing fetch failed: {}", message),
            Self::DetailFetchFailed(message) => write!(f, "detail fetch failed: {}", message),
            Self::ManifestFetchFailed(message) => write!(f, "manifest fetch failed: {}", message),
            Self::ManifestNotFound(filename) => {
                write!(f, "no {} found in package archive", filename)
            }
            Self::SnapshotWrite(message) => write!(f, "snapshot write failed: {}", message),
        }
    }
}

impl std::error::Error for IndexError {}
