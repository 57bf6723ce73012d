//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sprout_app::ports::{EventPublisher, HistoryStore, PlantClassifier, ProfileRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API under `/api` and exposes `/` (the endpoint map) and
/// `/health` at the root. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<PR, HS, CL, EP>(state: AppState<PR, HS, CL, EP>) -> Router
where
    PR: ProfileRepository + Send + Sync + 'static,
    HS: HistoryStore + Send + Sync + 'static,
    CL: PlantClassifier + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(crate::api::system::index::<PR, HS, CL, EP>))
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
