//! Store connectivity check.

use axum::Json;
use axum::extract::State;
use muse_core::conversations::list_conversations;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /test` — reads one conversation to prove the store is reachable.
///
/// Always answers 200; failures are reported in the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.as_ref();
    let checked = match store.ping().await {
        Ok(()) => list_conversations(store, 1).await,
        Err(e) => Err(e),
    };

    match checked {
        Ok(sample) => Json(HealthResponse {
            ok: true,
            connected: true,
            sample: Some(sample),
            error: None,
        }),
        Err(e) => {
            warn!(backend = store.backend(), "store health check failed: {e}");
            Json(HealthResponse {
                ok: false,
                connected: false,
                sample: None,
                error: Some(e.to_string()),
            })
        }
    }
}
