//! Notes REST API: CRUD over a single `notes` table, plus a caching client.

pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod models;
pub mod repository;
pub mod routes;
pub mod states;
pub mod validation;

pub use states::AppState;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use uuid::Uuid;

/// Build the router with every route and middleware attached.
pub fn app(state: AppState) -> Router {
    // The browser UI is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/notes", get(routes::list_notes).post(routes::create_note))
        .route(
            "/notes/{id}",
            get(routes::get_note)
                .patch(routes::update_note)
                .delete(routes::delete_note),
        )
        .with_state(state)
        // Note content has no size cap
        .layer(DefaultBodyLimit::disable())
        .layer(trace)
        .layer(cors)
}
