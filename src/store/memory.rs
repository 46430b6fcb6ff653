use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::domain::ListSnapshot;

use super::{SnapshotStore, StoreError};

/// In-memory store for testing and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: Mutex<ListSnapshot>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `lists`.
    pub fn with_lists(lists: ListSnapshot) -> Self {
        MemoryStore {
            lists: Mutex::new(lists),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves fail (for testing write-error reporting).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Get the last saved snapshot (for assertions).
    pub fn saved(&self) -> ListSnapshot {
        self.lists.lock().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> ListSnapshot {
        self.lists.lock().clone()
    }

    fn save(&self, lists: &ListSnapshot) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "saves disabled",
            )));
        }

        *self.lists.lock() = lists.clone();
        Ok(())
    }
}
