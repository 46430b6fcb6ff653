pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::domain::ListSnapshot;

/// Errors that can occur while persisting a snapshot.
///
/// Read-side failures never surface through this type: `load` degrades to the
/// default snapshot instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable backing for the category lists.
///
/// One loaded snapshot, mutated in place and saved back, brackets a session.
/// Implementations do not synchronize concurrent sessions themselves; the
/// caller guarantees a single writer per backing resource.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot, or the default empty snapshot when the
    /// backing resource is absent, malformed or unreadable.
    fn load(&self) -> ListSnapshot;

    /// Overwrite the backing resource with `lists`.
    fn save(&self, lists: &ListSnapshot) -> Result<(), StoreError>;
}
