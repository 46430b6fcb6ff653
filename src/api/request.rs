use serde::Deserialize;

use crate::domain::ActionKind;

/// Body of a `POST /v1/actions` invocation.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Which action to run
    pub action: ActionKind,

    /// Target URL; required by the list actions, unused by the rest
    #[serde(default)]
    pub url: Option<String>,
}
