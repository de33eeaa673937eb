mod brands;
mod catalog;

use std::{any::Any, path::Path};

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use greenshelf_db::{BrandStore, DbError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id, request_span};
use crate::views;

#[derive(Clone)]
pub struct AppState {
    pub store: BrandStore,
}

/// Failures a handler can end in. Validation problems are not errors: handlers
/// re-render the form themselves.
#[derive(Debug)]
pub enum WebError {
    NotFound(&'static str),
    UnreadableForm(FormRejection),
    Store(DbError),
}

impl From<DbError> for WebError {
    fn from(error: DbError) -> Self {
        WebError::Store(error)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(message) => not_found_response(message),
            WebError::UnreadableForm(rejection) => {
                tracing::debug!(error = %rejection, "rejected form body");
                (
                    rejection.status(),
                    Html(views::error_page(views::UNREADABLE_FORM_MESSAGE)),
                )
                    .into_response()
            }
            WebError::Store(error) => {
                tracing::error!(error = %error, "brand store operation failed");
                internal_error_response()
            }
        }
    }
}

fn not_found_response(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(views::error_page(message))).into_response()
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::error_page(views::INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");
    internal_error_response()
}

async fn not_found() -> Response {
    not_found_response(views::NOT_FOUND_MESSAGE)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    store: &'static str,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.backend();
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                store,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    store,
                }),
            )
        }
    }
}

pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(catalog::home))
        .route("/browse", get(catalog::browse))
        .route("/submit", get(brands::new_brand).post(brands::create_brand))
        .route(
            "/brands/{id}/edit",
            get(brands::edit_brand).post(brands::update_brand),
        )
        .route("/brands/{id}/delete", post(brands::delete_brand))
        .route("/health", get(health))
        .nest_service("/public", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

#[cfg(test)]
#[path = "web_test.rs"]
mod tests;
