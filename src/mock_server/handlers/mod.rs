//! HTTP request handlers for the mock server.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::DEFAULT_LIMIT;

pub mod forums;
pub mod pages;

pub use forums::*;
pub use pages::*;

pub type SharedState = Arc<RwLock<MockState>>;

/// Form data sent with verbose (POST) requests.
///
/// Every field is optional; missing paging fields fall back to the API's
/// defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub direction: Option<String>,
    pub timestamp: Option<i64>,
}

impl PageForm {
    fn descending(&self) -> bool {
        self.direction
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case("desc"))
    }
}

/// Cut one page out of an ascending listing.
pub fn paginate<T: Clone>(items: &[T], form: &PageForm) -> Vec<T> {
    let limit = form.limit.unwrap_or(DEFAULT_LIMIT) as usize;
    let offset = form.offset.unwrap_or(0) as usize;

    if form.descending() {
        items.iter().rev().skip(offset).take(limit).cloned().collect()
    } else {
        items.iter().skip(offset).take(limit).cloned().collect()
    }
}

/// 404 response in the shape the API reports errors.
pub fn not_found(what: &str, id: impl std::fmt::Display) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": format!("{what} not found"),
            "message": format!("No {} found with id: {}", what.to_lowercase(), id)
        })),
    )
        .into_response()
}

/// Reject requests without the required bearer token.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if !state.read().await.accepts(token) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"message": "Unauthenticated."})),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(limit: u32, offset: u32, direction: &str) -> PageForm {
        PageForm {
            limit: Some(limit),
            offset: Some(offset),
            direction: Some(direction.to_string()),
            timestamp: None,
        }
    }

    #[test]
    fn test_paginate_ascending_and_descending() {
        let items: Vec<u32> = (0..45).collect();

        assert_eq!(paginate(&items, &form(20, 40, "asc")), vec![40, 41, 42, 43, 44]);
        assert_eq!(paginate(&items, &form(3, 0, "desc")), vec![44, 43, 42]);
        assert!(paginate(&items, &form(20, 60, "asc")).is_empty());
    }

    #[test]
    fn test_paginate_defaults() {
        let items: Vec<u32> = (0..45).collect();
        let page = paginate(&items, &PageForm::default());

        assert_eq!(page.len(), DEFAULT_LIMIT as usize);
        assert_eq!(page[0], 0);
    }
}
