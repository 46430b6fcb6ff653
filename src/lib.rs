pub mod actions;
pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod policy;
pub mod probe;
pub mod store;

pub use config::Config;
pub use domain::{ActionKind, ActionOutcome, Hostname, ListName, ListSnapshot};
pub use store::{FileStore, MemoryStore, SnapshotStore};
