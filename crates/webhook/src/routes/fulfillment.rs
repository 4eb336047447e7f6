//! Dialogflow fulfillment route.

use axum::{Json, extract::State};
use tracing::{Span, field, instrument, warn};

use crate::error::{AppError, Result};
use crate::models::{WebhookRequest, WebhookResponse};
use crate::services::fulfillment::FulfillmentService;
use crate::state::AppState;

/// Fulfill one detect-intent turn.
///
/// The session comes from the first output context. A request without output
/// contexts is rejected; a context name without a session segment falls back
/// to the shared anonymous session.
#[instrument(
    name = "fulfillment",
    skip_all,
    fields(intent = field::Empty, session_id = field::Empty, response_id = field::Empty)
)]
pub async fn fulfill(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>> {
    let span = Span::current();
    span.record("intent", request.intent_name());
    if let Some(response_id) = &request.response_id {
        span.record("response_id", response_id.as_str());
    }

    let session_id = request
        .session_id()
        .ok_or_else(|| AppError::BadRequest("request has no outputContexts".to_owned()))?;
    span.record("session_id", session_id.as_str());

    if session_id.is_anonymous() {
        warn!(
            context = request
                .query_result
                .output_contexts
                .first()
                .map(|c| c.name.as_str()),
            "No session in output context, using the shared anonymous cart"
        );
    }

    let text = FulfillmentService::new(state.store())
        .fulfill(
            request.intent_name(),
            &request.query_result.parameters,
            &session_id,
        )
        .await?;

    Ok(Json(WebhookResponse::text(text)))
}
