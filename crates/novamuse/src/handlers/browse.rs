//! Browse handler: paged listing with optional genre/author filters.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use novamuse_core::browse::{browse_quotes, BrowseFilter, BrowseRequest};
use novamuse_core::pagination::{decode_cursor, encode_cursor, PageLimit};
use novamuse_core::quote::Quote;

use crate::{handlers::ApiError, state::AppState};

/// Query parameters for browsing. Everything is optional and kept raw so
/// that bad values degrade to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
}

/// One page of quotes plus the cursor to the next page, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub items: Vec<Quote>,
    pub next_cursor: Option<String>,
}

/// GET /quotes
pub async fn browse(
    State(state): State<AppState>,
    query: Result<Query<BrowseQuery>, QueryRejection>,
) -> Result<Json<BrowseResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::error!(error = %rejection, "Rejected browse query string");
        ApiError::internal(rejection.body_text())
    })?;

    let start_key = decode_cursor(query.cursor.as_deref()).map_err(|e| {
        tracing::error!(error = %e, "Rejected browse cursor");
        ApiError::internal(e.to_string())
    })?;

    let request = BrowseRequest {
        filter: BrowseFilter::new(query.genre, query.author),
        limit: PageLimit::parse(query.limit.as_deref()),
        start_key,
        order: state.config.browse_order,
    };

    let page = browse_quotes(state.repo.as_ref(), request).await?;

    Ok(Json(BrowseResponse {
        next_cursor: encode_cursor(page.last_evaluated_key.as_ref()),
        items: page.items,
    }))
}
