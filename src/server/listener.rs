use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::constants::EVENT_KEY_HEADER;
use crate::hook::{parse_hook, HookConfig};

#[derive(Debug, Clone)]
struct AppState {
    config: Arc<HookConfig>,
}

async fn handle(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let event_key = headers
        .get(EVENT_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match parse_hook(body.as_ref(), event_key, &state.config)
        .instrument(tracing::info_span!("parse_hook", event_key))
        .await
    {
        Ok(Some(hook)) => {
            tracing::info!("Converted {event_key} into {hook}");
            Json(hook).into_response()
        }
        Ok(None) => "skipped".into_response(),
        Err(e) => {
            tracing::warn!("Could not convert {event_key}: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

pub(crate) fn listen(config: Arc<HookConfig>) -> Router {
    Router::new()
        .route("/", post(handle))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { config })
}
