//! Create handler: admin-only conditional insert of a new quote.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use novamuse_core::quote::{CreateQuoteRequest, Quote};

use crate::{
    handlers::{claims::CallerClaims, ApiError, AppError},
    state::AppState,
};

pub const CREATED_MESSAGE: &str = "Quote created successfully";
pub const DUPLICATE_MESSAGE: &str = "Quote already exists";

/// POST /quote
///
/// Checks run in order: admin membership (403), body validation (400), then
/// the conditional write (409 on duplicate). Any other storage failure is not
/// recovered and surfaces as an opaque 500.
pub async fn create_quote(
    State(state): State<AppState>,
    claims: CallerClaims,
    body: Bytes,
) -> Result<Response, AppError> {
    if !claims.groups.is_member(&state.config.admin_group) {
        return Ok(ApiError::forbidden().into_response());
    }

    let new_quote = match CreateQuoteRequest::from_json(&body).and_then(|r| r.validate()) {
        Ok(new_quote) => new_quote,
        Err(e) => return Ok(ApiError::bad_request(e.to_string()).into_response()),
    };

    let quote = Quote::new(new_quote, Utc::now());

    match state.repo.put_if_absent(&quote).await {
        Ok(()) => {
            tracing::info!(quote_id = %quote.quote_id, genre = %quote.genre, "Created quote");
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": CREATED_MESSAGE,
                    "quoteId": quote.quote_id,
                })),
            )
                .into_response())
        }
        Err(e) if e.is_conflict() => Ok(ApiError::conflict(DUPLICATE_MESSAGE).into_response()),
        Err(e) => Err(e.into()),
    }
}
