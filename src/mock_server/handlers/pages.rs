//! Wiki, page and revision endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use super::{not_found, paginate, PageForm, SharedState};
use crate::{Revision, WikiPage};

/// GET /wikis
pub async fn list_wikis(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    (StatusCode::OK, Json(state.wikis.clone()))
}

/// GET /wiki
pub async fn get_wiki(State(state): State<SharedState>) -> Response {
    let state = state.read().await;

    match state.wikis.first() {
        Some(wiki) => (StatusCode::OK, Json(wiki.clone())).into_response(),
        None => not_found("Wiki", "current"),
    }
}

/// GET /page
///
/// Listing entries carry no metadata.
pub async fn list_pages(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    let pages: Vec<WikiPage> = state
        .pages
        .values()
        .map(|p| WikiPage {
            metadata: None,
            ..p.clone()
        })
        .collect();

    (StatusCode::OK, Json(pages))
}

/// GET /page/{id}
pub async fn get_page(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.get_page(id) {
        Some(page) => (StatusCode::OK, Json(page.clone())).into_response(),
        None => not_found("Page", id),
    }
}

/// GET /page/slug/{slug}
pub async fn get_page_by_slug(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_page_by_slug(&slug) {
        Some(page) => (StatusCode::OK, Json(page.clone())).into_response(),
        None => not_found("Page", slug),
    }
}

/// GET /page/{id}/revisions
///
/// Every revision, metadata only.
pub async fn list_page_revisions(
    State(state): State<SharedState>,
    Path(page_id): Path<u64>,
) -> Response {
    let state = state.read().await;

    if state.get_page(page_id).is_none() {
        return not_found("Page", page_id);
    }

    let revisions: Vec<Revision> = state
        .page_revisions(page_id)
        .iter()
        .map(without_content)
        .collect();

    (StatusCode::OK, Json(revisions)).into_response()
}

/// POST /page/{id}/revisions
///
/// One page of revisions, with content.
pub async fn page_revisions_page(
    State(state): State<SharedState>,
    Path(page_id): Path<u64>,
    Form(form): Form<PageForm>,
) -> Response {
    let state = state.read().await;

    if state.get_page(page_id).is_none() {
        return not_found("Page", page_id);
    }

    let page = paginate(state.page_revisions(page_id), &form);
    (StatusCode::OK, Json(page)).into_response()
}

/// GET /revision/{id}
pub async fn get_revision(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.get_revision(id) {
        Some(revision) => (StatusCode::OK, Json(without_content(revision))).into_response(),
        None => not_found("Revision", id),
    }
}

/// GET /revision/{id}/full
pub async fn get_full_revision(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Response {
    let state = state.read().await;

    match state.get_revision(id) {
        Some(revision) => (StatusCode::OK, Json(revision.clone())).into_response(),
        None => not_found("Revision", id),
    }
}

fn without_content(revision: &Revision) -> Revision {
    Revision {
        content: None,
        ..revision.clone()
    }
}
