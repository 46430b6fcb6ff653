use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hostname::Hostname;

/// Which of the two category lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Blacklist,
    Whitelist,
}

impl ListName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Blacklist => "blacklist",
            ListName::Whitelist => "whitelist",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutation conflicts. The target list is left unchanged in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("{host} is already on the {list}")]
    Duplicate { list: ListName, host: Hostname },

    #[error("{host} is not on the {list}")]
    Missing { list: ListName, host: Hostname },
}

/// In-memory pair of category lists at a point in time.
///
/// Serializes to the persisted JSON shape,
/// `{"blacklist": [...], "whitelist": [...]}`. The two lists are independent
/// namespaces: a hostname may appear on both at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Hostnames the proxy should block, in insertion order
    #[serde(default)]
    pub blacklist: Vec<Hostname>,

    /// Hostnames the proxy should always allow, in insertion order
    #[serde(default)]
    pub whitelist: Vec<Hostname>,
}

impl ListSnapshot {
    /// Entries of the named list, in insertion order.
    pub fn list(&self, name: ListName) -> &[Hostname] {
        match name {
            ListName::Blacklist => &self.blacklist,
            ListName::Whitelist => &self.whitelist,
        }
    }

    fn list_mut(&mut self, name: ListName) -> &mut Vec<Hostname> {
        match name {
            ListName::Blacklist => &mut self.blacklist,
            ListName::Whitelist => &mut self.whitelist,
        }
    }

    pub fn contains(&self, name: ListName, host: &Hostname) -> bool {
        self.list(name).contains(host)
    }

    /// Append `host` to the named list.
    ///
    /// Uniqueness is enforced here, not by the structure: entries loaded from
    /// a snapshot are checked against but never compacted.
    pub fn add(&mut self, name: ListName, host: Hostname) -> Result<(), ListError> {
        if self.contains(name, &host) {
            return Err(ListError::Duplicate { list: name, host });
        }

        self.list_mut(name).push(host);
        Ok(())
    }

    /// Remove the first occurrence of `host` from the named list.
    pub fn remove(&mut self, name: ListName, host: &Hostname) -> Result<(), ListError> {
        let entries = self.list_mut(name);

        match entries.iter().position(|entry| entry == host) {
            Some(index) => {
                entries.remove(index);
                Ok(())
            }
            None => Err(ListError::Missing {
                list: name,
                host: host.clone(),
            }),
        }
    }
}
