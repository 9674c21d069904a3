use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::MockState;

/// Route MAAS exposes for the machine listing; the mock mirrors it exactly.
pub const MACHINES_PATH: &str = "/MAAS/api/2.0/machines/";

/// Build the axum Router serving the machines endpoint.
/// Used by `serve()` and available for in-process testing.
pub fn build_router(state: MockState) -> Router {
    Router::new()
        .route(MACHINES_PATH, get(list_machines))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /MAAS/api/2.0/machines/ — the full current inventory as a JSON array.
///
/// No authentication check: any credentials (or none) are accepted. The lock
/// is held only for serialization, so each response is one consistent
/// whole-list snapshot. A marshal failure becomes a 500, never a crash.
async fn list_machines(State(state): State<MockState>) -> Response {
    match state.snapshot_json() {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Serve the mock on a pre-bound listener so callers can bind port 0 and
/// read the actual port before starting.
pub async fn serve(state: MockState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "mock MAAS server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
