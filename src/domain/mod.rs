pub mod action;
pub mod hostname;
pub mod list;

pub use action::{ActionKind, ActionOutcome, ActionStatus, ListOp};
pub use hostname::{Hostname, InvalidUrl};
pub use list::{ListError, ListName, ListSnapshot};
