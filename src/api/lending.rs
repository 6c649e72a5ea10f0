//! Checkout and return endpoints

use axum::{
    extract::State,
    Json,
};

use super::{BookId, ValidatedJson};
use crate::{
    error::AppResult,
    models::book::{Book, LendingRequest},
};

/// Check a book out
#[utoipa::path(
    post,
    path = "/books/{id}/checkout",
    tag = "lending",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = LendingRequest,
    responses(
        (status = 200, description = "Book checked out", body = Book),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book not available")
    )
)]
pub async fn checkout_book(
    State(state): State<crate::AppState>,
    BookId(id): BookId,
    ValidatedJson(request): ValidatedJson<LendingRequest>,
) -> AppResult<Json<Book>> {
    let book = state.services.lending.checkout(id, &request.username).await?;
    Ok(Json(book))
}

/// Return a checked out book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "lending",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = LendingRequest,
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book already available or held by someone else")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    BookId(id): BookId,
    ValidatedJson(request): ValidatedJson<LendingRequest>,
) -> AppResult<Json<Book>> {
    let book = state.services.lending.return_book(id, &request.username).await?;
    Ok(Json(book))
}
