use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::actions::{self, ActionError};
use crate::domain::{ActionKind, ActionOutcome, ListError};
use crate::observability::MetricsRegistry;
use crate::policy;
use crate::probe::{self, ProxyEndpoint, SUCC_CONNECTIVITY_TEST};
use crate::store::SnapshotStore;

use super::request::ActionRequest;
use super::response::HealthResponse;

/// Shared application state.
pub struct AppState {
    /// Backing store for the category lists
    pub store: Arc<dyn SnapshotStore>,

    /// Serializes load-mutate-save sessions against the backing store
    pub session_lock: parking_lot::Mutex<()>,

    /// Proxy appliance management endpoint
    pub proxy: ProxyEndpoint,

    /// Metrics counters
    pub metrics: MetricsRegistry,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,
}

/// Create the application router.
///
/// The policy document is the fallback route: the proxy appliance fetches it
/// from whatever path it was configured with.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/actions", post(handle_action))
        .route("/health", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .fallback(handle_policy)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle a single action invocation.
async fn handle_action(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActionRequest>,
) -> impl IntoResponse {
    state.metrics.record_action();

    let result = match req.action {
        ActionKind::TestConnectivity => {
            state.metrics.record_connectivity_check();

            match probe::check_connectivity(&state.proxy).await {
                Ok(()) => Ok(ActionOutcome::success(SUCC_CONNECTIVITY_TEST, None)),
                Err(e) => {
                    state.metrics.record_connectivity_failure();
                    Err(ActionError::Connection(e))
                }
            }
        }
        kind => {
            let _session = state.session_lock.lock();
            actions::apply(kind, req.url.as_deref(), state.store.as_ref())
        }
    };

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome)),
        Err(e) => {
            state.metrics.record_action_failure();
            warn!(action = %req.action, error = %e, "Action failed");

            (
                status_for(&e),
                Json(ActionOutcome::failure(e.to_string(), e.code())),
            )
        }
    }
}

fn status_for(error: &ActionError) -> StatusCode {
    match error {
        ActionError::List(ListError::Duplicate { .. }) => StatusCode::CONFLICT,
        ActionError::List(ListError::Missing { .. }) => StatusCode::NOT_FOUND,
        ActionError::InvalidInput(_) | ActionError::MissingUrl(_) => StatusCode::BAD_REQUEST,
        ActionError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        ActionError::StorageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ActionError::Connection(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Serve the rendered policy document, regardless of request path.
async fn handle_policy(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics.record_policy_render();

    let lists = state.store.load();
    let document = policy::render(&lists);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        document,
    )
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let lists = state.store.load();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        blacklist_entries: lists.blacklist.len(),
        whitelist_entries: lists.whitelist.len(),
    })
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let metrics = format!(
        r#"# HELP proxycat_uptime_seconds Application uptime in seconds
# TYPE proxycat_uptime_seconds counter
proxycat_uptime_seconds {}

# HELP proxycat_actions_total Action invocations received
# TYPE proxycat_actions_total counter
proxycat_actions_total {}

# HELP proxycat_actions_failed Action invocations that reported failure
# TYPE proxycat_actions_failed counter
proxycat_actions_failed {}

# HELP proxycat_policy_renders_total Policy document renders served
# TYPE proxycat_policy_renders_total counter
proxycat_policy_renders_total {}

# HELP proxycat_connectivity_checks_total Connectivity probes issued
# TYPE proxycat_connectivity_checks_total counter
proxycat_connectivity_checks_total {}

# HELP proxycat_connectivity_failures_total Connectivity probes that failed
# TYPE proxycat_connectivity_failures_total counter
proxycat_connectivity_failures_total {}
"#,
        state.start_time.elapsed().as_secs(),
        state.metrics.actions_total.load(Ordering::Relaxed),
        state.metrics.actions_failed.load(Ordering::Relaxed),
        state.metrics.policy_renders_total.load(Ordering::Relaxed),
        state.metrics.connectivity_checks_total.load(Ordering::Relaxed),
        state
            .metrics
            .connectivity_failures_total
            .load(Ordering::Relaxed),
    );

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        metrics,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hostname, ListName, ListSnapshot};
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;

    fn test_app_state(store: MemoryStore) -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::new(store) as Arc<dyn SnapshotStore>,
            session_lock: parking_lot::Mutex::new(()),
            proxy: ProxyEndpoint {
                host: "proxy.internal".to_string(),
                mgmt_port: 8082,
                username: "admin".to_string(),
                password: String::new(),
                verify_tls: true,
                test_target: "http://www.google.com".to_string(),
            },
            metrics: MetricsRegistry::new(),
            start_time: Instant::now(),
            version: "0.1.0-test".to_string(),
        })
    }

    fn seeded_store() -> MemoryStore {
        let mut lists = ListSnapshot::default();
        lists
            .add(ListName::Blacklist, Hostname::new("host1.example"))
            .unwrap();
        lists
            .add(ListName::Blacklist, Hostname::new("host2.example"))
            .unwrap();
        lists
            .add(ListName::Whitelist, Hostname::new("host3.example"))
            .unwrap();
        MemoryStore::with_lists(lists)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn action_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/actions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_app_state(MemoryStore::new()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_policy_served_on_any_path() {
        let state = test_app_state(seeded_store());

        for path in ["/", "/policy", "/some/deep/path"] {
            let app = create_router(state.clone());
            let request = Request::builder().uri(path).body(Body::empty()).unwrap();

            let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_string(response).await;
            assert_eq!(
                body,
                "define category phantom_blacklist\n\
                 host1.example\n\
                 host2.example\n\
                 end\n\
                 define category phantom_whitelist\n\
                 host3.example\n\
                 end"
            );
        }
    }

    #[tokio::test]
    async fn test_block_then_duplicate_conflict() {
        let state = test_app_state(MemoryStore::new());

        let app = create_router(state.clone());
        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "block_url", "url": "http://evil.example/x"}"#),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("\"status\":\"success\""));
        assert!(body.contains("evil.example"));

        let app = create_router(state);
        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "block_url", "url": "http://evil.example/y"}"#),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_string(response).await;
        assert!(body.contains("DUPLICATE_ENTRY"));
    }

    #[tokio::test]
    async fn test_unblock_unknown_is_not_found() {
        let app = create_router(test_app_state(MemoryStore::new()));

        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "unblock_url", "url": "http://ghost.example"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_url_reputation_not_implemented() {
        let app = create_router(test_app_state(MemoryStore::new()));

        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "url_reputation", "url": "http://unknown.example"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let body = body_string(response).await;
        assert!(body.contains("NOT_IMPLEMENTED"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_request() {
        let app = create_router(test_app_state(MemoryStore::new()));

        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "block_url", "url": "no hostname here"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_save_failure_is_internal_error() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let app = create_router(test_app_state(store));

        let response = tower::ServiceExt::oneshot(
            app,
            action_request(r#"{"action": "block_url", "url": "http://a.com"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert!(body.contains("STORAGE_WRITE_ERROR"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = create_router(test_app_state(MemoryStore::new()));

        let request = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("proxycat_actions_total"));
    }
}
