use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use std::any::Any;

use crate::{
    dto::SendEmailResponse,
    handler,
    handler::{AppState, INTERNAL_ERROR},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/send-email", post(handler::send_email))
        .route("/health", get(handler::health_check))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// Panic text stays in the log, never in the response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SendEmailResponse::failed(INTERNAL_ERROR.to_string())),
    )
        .into_response()
}
