//! Distinct genre and author listings.

use axum::{extract::State, Json};

use novamuse_core::catalog::list_distinct_values;
use novamuse_core::storage::QuoteIndex;

use crate::{handlers::ApiError, state::AppState};

/// GET /genres
pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let genres = list_distinct_values(state.repo.as_ref(), QuoteIndex::Genre).await?;
    Ok(Json(genres))
}

/// GET /authors
pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let authors = list_distinct_values(state.repo.as_ref(), QuoteIndex::Author).await?;
    Ok(Json(authors))
}
