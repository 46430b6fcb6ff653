pub mod render;

pub use render::{render, BLACKLIST_CATEGORY, WHITELIST_CATEGORY};
