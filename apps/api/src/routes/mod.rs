pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::ingest::handlers as ingest_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(ingest_handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            delete(ingest_handlers::handle_delete_session),
        )
        // Uploads
        .route(
            "/api/v1/sessions/:id/job",
            post(ingest_handlers::handle_upload_job),
        )
        .route(
            "/api/v1/sessions/:id/resumes",
            post(ingest_handlers::handle_upload_resumes),
        )
        .route(
            "/api/v1/sessions/:id/documents",
            get(ingest_handlers::handle_list_documents),
        )
        // Scoring
        .route(
            "/api/v1/sessions/:id/match",
            post(match_handlers::handle_match),
        )
        .route(
            "/api/v1/sessions/:id/match/chart",
            get(match_handlers::handle_match_chart),
        )
        .route(
            "/api/v1/sessions/:id/filter",
            post(match_handlers::handle_filter),
        )
        .with_state(state)
}
