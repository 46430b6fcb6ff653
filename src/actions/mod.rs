use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{ActionKind, ActionOutcome, Hostname, InvalidUrl, ListError, ListOp};
use crate::probe::{self, ProbeError, ProxyEndpoint, ERR_CONNECTIVITY_TEST, SUCC_CONNECTIVITY_TEST};
use crate::store::{SnapshotStore, StoreError};

/// Failure kinds on the action surface.
///
/// Every variant carries a fixed human-readable message and maps to a stable
/// code via [`ActionError::code`]; none are fatal to the host process.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidUrl),

    #[error("action {0} requires a url parameter")]
    MissingUrl(ActionKind),

    #[error("action {0} is not implemented")]
    NotImplemented(ActionKind),

    #[error("unable to persist list state: {0}")]
    StorageWrite(#[from] StoreError),

    #[error("Connectivity test failed. {0}")]
    Connection(#[from] ProbeError),
}

impl ActionError {
    /// Stable code string reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::List(ListError::Duplicate { .. }) => "DUPLICATE_ENTRY",
            ActionError::List(ListError::Missing { .. }) => "NOT_FOUND",
            ActionError::InvalidInput(_) | ActionError::MissingUrl(_) => "INVALID_INPUT",
            ActionError::NotImplemented(_) => "NOT_IMPLEMENTED",
            ActionError::StorageWrite(_) => "STORAGE_WRITE_ERROR",
            ActionError::Connection(_) => "CONNECTION_ERROR",
        }
    }
}

/// Run one list session: load, apply a single mutating action, save.
///
/// The store brackets the session explicitly; the snapshot is never ambient
/// state. `url_reputation` is declared on the action surface but has no
/// defined behavior, so it fails explicitly instead of silently succeeding.
/// `test_connectivity` has no list target either; callers dispatch it to
/// [`crate::probe`] before reaching this point.
pub fn apply(
    kind: ActionKind,
    raw_url: Option<&str>,
    store: &dyn SnapshotStore,
) -> Result<ActionOutcome, ActionError> {
    debug!(action = %kind, "Handling action");

    // TODO: implement url_reputation once the appliance's WebPulse lookup API is scoped
    let Some((list, op)) = kind.list_target() else {
        return Err(ActionError::NotImplemented(kind));
    };

    let raw = raw_url.ok_or(ActionError::MissingUrl(kind))?;
    let host = Hostname::extract(raw)?;

    let mut lists = store.load();
    match op {
        ListOp::Add => lists.add(list, host.clone())?,
        ListOp::Remove => lists.remove(list, &host)?,
    }
    store.save(&lists)?;

    info!(action = %kind, host = %host, list = %list, "List session saved");

    Ok(ActionOutcome::success(kind.success_message(), Some(lists)))
}

/// Dispatch a single action invocation.
///
/// Connectivity tests go to the probe; everything else runs a list session
/// through [`apply`].
pub async fn run(
    kind: ActionKind,
    raw_url: Option<&str>,
    store: &dyn SnapshotStore,
    proxy: &ProxyEndpoint,
) -> Result<ActionOutcome, ActionError> {
    match kind {
        ActionKind::TestConnectivity => {
            probe::check_connectivity(proxy).await.map_err(|e| {
                warn!(error = %e, "{}", ERR_CONNECTIVITY_TEST);
                ActionError::Connection(e)
            })?;

            Ok(ActionOutcome::success(SUCC_CONNECTIVITY_TEST, None))
        }
        _ => apply(kind, raw_url, store),
    }
}
