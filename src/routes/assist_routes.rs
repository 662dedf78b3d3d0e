use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::TryStreamExt;
use tracing::warn;

use crate::errors::AppError;
use crate::gateway::GatewayClient;
use crate::models::{AssistKind, AssistRequest};

/// POST `/api/assist` — proxies one request to the AI gateway.
///
/// `type: "analyze"` forwards a non-streaming completion and returns the
/// gateway's chat-completion JSON verbatim. `type: "chat"` forwards with
/// `stream: true` and pipes the gateway's SSE byte stream through untouched;
/// the frontend decodes the `data:` frames.
pub async fn assist_handler(
    State(gateway): State<GatewayClient>,
    Json(request): Json<AssistRequest>,
) -> Response {
    if request.messages.is_empty() {
        return error_response(&AppError::EmptyField { field_name: "messages".to_string() });
    }

    match request.kind {
        AssistKind::Analyze => match gateway.complete(&request.messages).await {
            Ok(completion) => Json(completion).into_response(),
            Err(e) => error_response(&e),
        },
        AssistKind::Chat => match gateway.stream(&request.messages).await {
            Ok(upstream) => {
                let stream = upstream
                    .bytes_stream()
                    .inspect_err(|e| warn!("Gateway stream interrupted: {e}"));
                (
                    [(header::CONTENT_TYPE, "text/event-stream")],
                    Body::from_stream(stream),
                )
                    .into_response()
            }
            Err(e) => error_response(&e),
        },
    }
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_responses_carry_distinct_statuses() {
        assert_eq!(error_response(&AppError::RateLimited).status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            error_response(&AppError::CreditsExhausted).status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            error_response(&AppError::UpstreamFailure { status: 500 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_response(&AppError::EmptyField { field_name: "messages".to_string() }).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
