//! Forum, thread and post endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use super::{not_found, paginate, PageForm, SharedState};
use crate::{Forum, Post};

/// GET /forum
pub async fn list_forums(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let forums: Vec<Forum> = state.forums.values().cloned().collect();
    (StatusCode::OK, Json(forums))
}

/// GET /forum/{id}
pub async fn get_forum(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.forums.get(&id) {
        Some(forum) => (StatusCode::OK, Json(forum.clone())).into_response(),
        None => not_found("Forum", id),
    }
}

/// GET /forum/{id}/threads
pub async fn list_forum_threads(
    State(state): State<SharedState>,
    Path(forum_id): Path<u64>,
) -> Response {
    let state = state.read().await;

    if !state.forums.contains_key(&forum_id) {
        return not_found("Forum", forum_id);
    }

    (StatusCode::OK, Json(state.forum_threads(forum_id, None))).into_response()
}

/// POST /forum/{id}/since
pub async fn forum_threads_since(
    State(state): State<SharedState>,
    Path(forum_id): Path<u64>,
    Form(form): Form<PageForm>,
) -> Response {
    let Some(since) = form.timestamp else {
        return missing_timestamp();
    };
    let state = state.read().await;

    if !state.forums.contains_key(&forum_id) {
        return not_found("Forum", forum_id);
    }

    let threads = state.forum_threads(forum_id, Some(since));
    (StatusCode::OK, Json(paginate(&threads, &form))).into_response()
}

/// GET /thread/{id}
pub async fn get_thread(State(state): State<SharedState>, Path(id): Path<u64>) -> Response {
    let state = state.read().await;

    match state.threads.get(&id) {
        Some(thread) => (StatusCode::OK, Json(thread.clone())).into_response(),
        None => not_found("Thread", id),
    }
}

/// GET /thread/{id}/posts
///
/// Every post in the thread, without bodies.
pub async fn list_thread_posts(
    State(state): State<SharedState>,
    Path(thread_id): Path<u64>,
) -> Response {
    let state = state.read().await;

    if !state.threads.contains_key(&thread_id) {
        return not_found("Thread", thread_id);
    }

    let posts: Vec<Post> = state
        .thread_posts(thread_id, None)
        .into_iter()
        .map(|p| Post { content: None, ..p })
        .collect();

    (StatusCode::OK, Json(posts)).into_response()
}

/// POST /thread/{id}/posts
pub async fn thread_posts_page(
    State(state): State<SharedState>,
    Path(thread_id): Path<u64>,
    Form(form): Form<PageForm>,
) -> Response {
    let state = state.read().await;

    if !state.threads.contains_key(&thread_id) {
        return not_found("Thread", thread_id);
    }

    let posts = state.thread_posts(thread_id, None);
    (StatusCode::OK, Json(paginate(&posts, &form))).into_response()
}

/// POST /thread/{id}/since
pub async fn thread_posts_since(
    State(state): State<SharedState>,
    Path(thread_id): Path<u64>,
    Form(form): Form<PageForm>,
) -> Response {
    let Some(since) = form.timestamp else {
        return missing_timestamp();
    };
    let state = state.read().await;

    if !state.threads.contains_key(&thread_id) {
        return not_found("Thread", thread_id);
    }

    let posts = state.thread_posts(thread_id, Some(since));
    (StatusCode::OK, Json(paginate(&posts, &form))).into_response()
}

fn missing_timestamp() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({"message": "The timestamp field is required."})),
    )
        .into_response()
}
