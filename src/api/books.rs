//! Book catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{BookId, ValidatedJson};
use crate::{
    error::AppResult,
    models::book::{Book, BookMetadata},
};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list().await?;
    Ok(Json(books))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookMetadata,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(metadata): ValidatedJson<BookMetadata>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create(&metadata).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    BookId(id): BookId,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get(id).await?;
    Ok(Json(book))
}

/// Update title, author and year of a book
#[utoipa::path(
    post,
    path = "/books/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookMetadata,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    BookId(id): BookId,
    ValidatedJson(metadata): ValidatedJson<BookMetadata>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update(id, &metadata).await?;
    Ok(Json(book))
}

/// Delete a book, even while checked out
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted, or did not exist")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    BookId(id): BookId,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
