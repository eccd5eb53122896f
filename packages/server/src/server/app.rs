//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    auth::login_handler,
    departments::list_departments_handler,
    health::health_handler,
    records::{
        add_note_handler, attach_file_handler, create_record_handler,
        download_attachment_handler, get_record_handler, list_notes_handler,
        list_records_handler, record_history_handler, transfer_record_handler,
        update_record_handler,
    },
    users::{create_user_handler, delete_user_handler, list_users_handler, update_user_handler},
};

/// Uploads beyond this size are rejected outright.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let state = AppState { deps };

    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(login_handler))
        .route("/departments", get(list_departments_handler))
        .route(
            "/records",
            get(list_records_handler).post(create_record_handler),
        )
        .route(
            "/records/:id",
            get(get_record_handler).put(update_record_handler),
        )
        .route("/records/:id/transfer", post(transfer_record_handler))
        .route("/records/:id/attach", post(attach_file_handler))
        .route("/records/:id/history", get(record_history_handler))
        .route(
            "/records/:id/notes",
            get(list_notes_handler).post(add_note_handler),
        )
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/:id",
            axum::routing::put(update_user_handler).delete(delete_user_handler),
        )
        .route("/uploads/:filename", get(download_attachment_handler))
        .layer(middleware::from_fn(move |request, next| {
            jwt_auth_middleware(jwt_service.clone(), request, next)
        }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
