use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    dto::{DEFAULT_MESSAGE, DEFAULT_SUBJECT, HealthResponse, SendEmailRequest, SendEmailResponse},
    service::{Mailer, OutboundMessage},
};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub owner_email: String,
}

impl AppState {
    pub fn new(mailer: Arc<dyn Mailer>, owner_email: impl Into<String>) -> Self {
        Self {
            mailer,
            owner_email: owner_email.into(),
        }
    }
}

pub const INTERNAL_ERROR: &str = "Internal server error";

fn failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SendEmailResponse::failed(error)),
    )
        .into_response()
}

#[debug_handler]
pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let detail = rejection.body_text();
            tracing::warn!("Rejected send-email payload: {}", detail);
            return failure(detail);
        }
    };

    let to = request.to.unwrap_or_else(|| state.owner_email.clone());
    let subject = request.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
    let body = request.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    let message = match OutboundMessage::new(&to, subject, body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Refusing to send email to '{}': {e}", to);
            return failure(e.to_string());
        }
    };

    // The session runs on its own task so a client hanging up does not cut it
    // short; the mailer's own timeout bounds it.
    let mailer = Arc::clone(&state.mailer);
    let dispatch = tokio::spawn(async move { mailer.send(message).await });

    match dispatch.await {
        Ok(Ok(detail)) => {
            (StatusCode::OK, Json(SendEmailResponse::sent(detail))).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to send email: {e}");
            failure(e.to_string())
        }
        Err(e) => {
            tracing::error!("Email dispatch task failed: {e}");
            failure(INTERNAL_ERROR.to_string())
        }
    }
}

#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, Json(HealthResponse::default())).into_response()
}
