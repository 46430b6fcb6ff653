use crate::domain::{Hostname, ListSnapshot};

/// Category name the proxy resolves blocked hosts against.
pub const BLACKLIST_CATEGORY: &str = "phantom_blacklist";

/// Category name the proxy resolves allowed hosts against.
pub const WHITELIST_CATEGORY: &str = "phantom_whitelist";

/// Render a snapshot into the proxy's category-definition syntax.
///
/// Hostnames are emitted one per line in list order, without escaping or
/// validation; the store's invariant guarantees entries are already bare
/// hostnames. Pure function of the snapshot: two calls on an unmodified
/// snapshot produce byte-identical output.
pub fn render(lists: &ListSnapshot) -> String {
    format!(
        "define category {}\n{}\nend\ndefine category {}\n{}\nend",
        BLACKLIST_CATEGORY,
        join(&lists.blacklist),
        WHITELIST_CATEGORY,
        join(&lists.whitelist),
    )
}

fn join(entries: &[Hostname]) -> String {
    entries
        .iter()
        .map(Hostname::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
