//! Request handlers and the router wiring them to paths.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use bookstore::prelude::*;

use crate::error::ApiError;

type SharedStore = Arc<DynBookStore>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Builds the application router over `store`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/search", get(search_books))
        .route(
            "/books/:id",
            get(get_book).put(replace_book).delete(delete_book),
        )
        .with_state(store)
}

async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(store.get(id).await?))
}

async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let Json(book) = payload?;
    let created = store.create(book).await?;

    tracing::info!(id = ?created.id, title = %created.title, "book created");

    Ok((StatusCode::CREATED, Json(created)))
}

async fn replace_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(book) = payload?;

    Ok(Json(store.replace(id, book).await?))
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(id.as_str()).await?;

    tracing::info!(%id, "book deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn search_books(
    State(store): State<SharedStore>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let keyword = params.q.unwrap_or_default();

    Ok(Json(store.search(&keyword).await?))
}
