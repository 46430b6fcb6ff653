use std::fmt;

use serde::{Deserialize, Serialize};

use super::list::{ListName, ListSnapshot};

/// Whether a list action inserts or deletes an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    Add,
    Remove,
}

/// Identifier of an action on the connector's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    BlockUrl,
    UnblockUrl,
    AllowUrl,
    DisallowUrl,
    UrlReputation,
    TestConnectivity,
}

impl ActionKind {
    /// The list and operation a mutating action maps to, if any.
    pub fn list_target(&self) -> Option<(ListName, ListOp)> {
        match self {
            ActionKind::BlockUrl => Some((ListName::Blacklist, ListOp::Add)),
            ActionKind::UnblockUrl => Some((ListName::Blacklist, ListOp::Remove)),
            ActionKind::AllowUrl => Some((ListName::Whitelist, ListOp::Add)),
            ActionKind::DisallowUrl => Some((ListName::Whitelist, ListOp::Remove)),
            ActionKind::UrlReputation | ActionKind::TestConnectivity => None,
        }
    }

    /// Parse from the wire identifier.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "block_url" => Some(ActionKind::BlockUrl),
            "unblock_url" => Some(ActionKind::UnblockUrl),
            "allow_url" => Some(ActionKind::AllowUrl),
            "disallow_url" => Some(ActionKind::DisallowUrl),
            "url_reputation" => Some(ActionKind::UrlReputation),
            "test_connectivity" => Some(ActionKind::TestConnectivity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::BlockUrl => "block_url",
            ActionKind::UnblockUrl => "unblock_url",
            ActionKind::AllowUrl => "allow_url",
            ActionKind::DisallowUrl => "disallow_url",
            ActionKind::UrlReputation => "url_reputation",
            ActionKind::TestConnectivity => "test_connectivity",
        }
    }

    /// Fixed message reported when the action succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            ActionKind::BlockUrl => "URL blocked",
            ActionKind::UnblockUrl => "URL unblocked",
            ActionKind::AllowUrl => "URL allowed",
            ActionKind::DisallowUrl => "URL disallowed",
            ActionKind::UrlReputation => "URL reputation retrieved",
            ActionKind::TestConnectivity => "Connectivity test passed",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an action invocation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Failed,
}

/// Result of one action invocation, as reported back to the caller.
///
/// Failures carry a stable code and a fixed message; none are fatal to the
/// host process.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub status: ActionStatus,

    /// Fixed human-readable message
    pub message: String,

    /// Stable failure code, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,

    /// Updated lists, present after a successful mutation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ListSnapshot>,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>, data: Option<ListSnapshot>) -> Self {
        ActionOutcome {
            status: ActionStatus::Success,
            message: message.into(),
            code: None,
            data,
        }
    }

    pub fn failure(message: impl Into<String>, code: &'static str) -> Self {
        ActionOutcome {
            status: ActionStatus::Failed,
            message: message.into(),
            code: Some(code),
            data: None,
        }
    }
}
