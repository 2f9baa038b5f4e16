use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{Orchestrator, PlanResponse, TourGuideError, message::chat_reply};

#[derive(Serialize, Deserialize)]
pub struct QueryIn {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Upstream failures as `{"error": true, "message": ...}` without upstream detail
pub struct ApiError(TourGuideError);

impl From<TourGuideError> for ApiError {
    fn from(err: TourGuideError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TourGuideError::Upstream { .. } | TourGuideError::Timeout { .. } => {
                StatusCode::BAD_GATEWAY
            }
            TourGuideError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Request failed: {}", self.0);
        let body = json!({ "error": true, "message": self.0.user_message() });
        (status, Json(body)).into_response()
    }
}

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/plan", post(plan))
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(orchestrator)
}

async fn plan(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(query): Json<QueryIn>,
) -> Result<Json<PlanResponse>, ApiError> {
    let response = orchestrator.handle(&query.text).await?;
    Ok(Json(response))
}

/// Accepts either a bare JSON string or `{"text": ...}`
async fn chat(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(body): Json<Value>,
) -> Result<Json<ChatReply>, ApiError> {
    let text = match body {
        Value::String(text) => text,
        other => other
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    };

    let response = orchestrator.handle(&text).await?;
    Ok(Json(ChatReply {
        reply: chat_reply(&response),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
