use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::ListSnapshot;

use super::{SnapshotStore, StoreError};

/// JSON-file-backed snapshot store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given backing file. The file itself is only
    /// touched by `load` and `save`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ListSnapshot, StoreError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let lists = serde_json::from_reader(reader)?;
        Ok(lists)
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> ListSnapshot {
        match self.read() {
            Ok(lists) => {
                debug!(path = %self.path.display(), "Loaded list snapshot");
                lists
            }
            Err(StoreError::Io(ref e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No list snapshot yet, starting empty");
                ListSnapshot::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable list snapshot, starting empty");
                ListSnapshot::default()
            }
        }
    }

    fn save(&self, lists: &ListSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to temp file first, then rename for atomicity
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = self.path.with_file_name(format!(".{}.tmp", file_name));

        {
            let file = File::create(&temp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer(writer, lists)?;
        }

        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), "Saved list snapshot");

        Ok(())
    }
}
