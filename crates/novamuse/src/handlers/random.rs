//! Random/lookup handler.
//!
//! With `author` or `genre`, returns up to the first twenty quotes of that
//! index partition. Without either, returns one random quote from a genre
//! chosen by configuration or at random from the cached genre list.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use novamuse_core::catalog::list_distinct_values;
use novamuse_core::pagination::LOOKUP_LIMIT;
use novamuse_core::quote::Quote;
use novamuse_core::storage::{keys, QuoteIndex, Result};

use crate::{handlers::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    pub author: Option<String>,
    pub genre: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /quote
pub async fn random_quote(
    State(state): State<AppState>,
    query: std::result::Result<Query<RandomQuery>, QueryRejection>,
) -> std::result::Result<Json<Vec<Quote>>, ApiError> {
    let Query(query) = query?;

    if let Some(author) = present(query.author) {
        let quotes = lookup(&state, QuoteIndex::Author, &keys::author_pk(&author)).await?;
        return Ok(Json(quotes));
    }

    if let Some(genre) = present(query.genre) {
        let quotes = lookup(&state, QuoteIndex::Genre, &keys::genre_pk(&genre)).await?;
        return Ok(Json(quotes));
    }

    let Some(genre) = select_genre(&state).await? else {
        return Ok(Json(Vec::new()));
    };

    let candidates = lookup(&state, QuoteIndex::Genre, &keys::genre_pk(&genre)).await?;
    let picked = state.picker.pick(candidates.as_slice()).cloned();
    tracing::debug!(%genre, candidates = candidates.len(), "Picked random quote");

    Ok(Json(picked.into_iter().collect()))
}

/// First page of an index partition, capped at the lookup limit.
async fn lookup(state: &AppState, index: QuoteIndex, partition_key: &str) -> Result<Vec<Quote>> {
    let page = state
        .repo
        .query(
            index,
            partition_key,
            Some(LOOKUP_LIMIT),
            None,
            state.config.browse_order,
        )
        .await?;
    Ok(page.items)
}

/// The configured genre, or a random one from the cached distinct genres.
/// `None` when the table holds no genres at all.
async fn select_genre(state: &AppState) -> Result<Option<String>> {
    if let Some(genre) = &state.config.random_genre {
        return Ok(Some(genre.clone()));
    }

    let repo = state.repo.as_ref();
    let genres = state
        .genres
        .get_or_load(|| list_distinct_values(repo, QuoteIndex::Genre))
        .await?;

    Ok(state.picker.pick(genres.as_slice()).cloned())
}
