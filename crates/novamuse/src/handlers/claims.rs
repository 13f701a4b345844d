//! Axum extractor for the caller's identity claims.
//!
//! Authentication happens at the gateway. It forwards the groups claim in a
//! request header whose name is configurable.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use novamuse_core::auth::CallerGroups;

use crate::state::AppState;

/// Claims of the calling user. Absent claims mean no groups.
#[derive(Debug, Clone, Default)]
pub struct CallerClaims {
    pub groups: CallerGroups,
}

impl FromRequestParts<AppState> for CallerClaims {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(state.config.groups_header.as_str())
            .and_then(|v| v.to_str().ok());

        Ok(Self {
            groups: CallerGroups::parse(raw),
        })
    }
}
