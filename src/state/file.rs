//! JSON state file.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::network::{InterfaceAddress, InterfaceSet, InterfaceSnapshot};

use super::{LoadResult, PersistedState, StateError, StateStore};

/// Layout version written into every file; any other value reads as corrupted.
const FORMAT_VERSION: u32 = 1;

/// On-disk layout.
///
/// `ips` is a flattened, human-readable view of `adapters` for people
/// inspecting the file; it is written but never read back.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,

    /// When a notification was last delivered.
    last_updated: Option<DateTime<Utc>>,

    hostname: Option<String>,

    #[serde(default)]
    interfaces_of_interest: InterfaceSet,

    #[serde(default, skip_deserializing)]
    ips: Vec<InterfaceAddress>,

    /// Structured adapter records, the source of truth for comparison.
    #[serde(default)]
    adapters: InterfaceSnapshot,
}

impl StateFile {
    fn encode(state: &PersistedState) -> Result<Vec<u8>, StateError> {
        let file = Self {
            version: FORMAT_VERSION,
            last_updated: state.last_updated,
            hostname: state.hostname.clone(),
            interfaces_of_interest: state.interfaces_of_interest.clone(),
            ips: state.snapshot.entries(),
            adapters: state.snapshot.clone(),
        };
        serde_json::to_vec_pretty(&file).map_err(StateError::Serialize)
    }

    fn decode(content: &str) -> LoadResult {
        let file = match serde_json::from_str::<Self>(content) {
            Ok(file) => file,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Invalid JSON: {e}"),
                };
            }
        };

        if file.version != FORMAT_VERSION {
            return LoadResult::Corrupted {
                reason: format!(
                    "Incompatible version: expected {FORMAT_VERSION}, got {}",
                    file.version
                ),
            };
        }

        LoadResult::Loaded(PersistedState {
            last_updated: file.last_updated,
            hostname: file.hostname,
            interfaces_of_interest: file.interfaces_of_interest,
            snapshot: file.adapters,
        })
    }
}

/// [`StateStore`] backed by a pretty-printed JSON file.
///
/// Saves go to `<path>.tmp`, are flushed to disk, then renamed over
/// `<path>`, so a crash mid-save leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Replaces `path` with `bytes` via a flushed sibling temp file.
fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    // ip_store.json -> ip_store.json.tmp
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let written =
        write_synced(&temp_path, bytes).and_then(|()| std::fs::rename(&temp_path, path));
    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    written
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl StateStore for FileStateStore {
    fn load(&self) -> LoadResult {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => StateFile::decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => LoadResult::NotFound,
            Err(e) => LoadResult::Corrupted {
                reason: format!("Failed to read file: {e}"),
            },
        }
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        let bytes = StateFile::encode(state)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| StateError::Write(std::io::Error::other(e)))?
            .map_err(StateError::Write)
    }
}
