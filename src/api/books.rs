//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{
        AssignBook, BookDto, BookListQuery, BookSearchQuery, CreateBook, UpdateBook,
    },
};

use super::CreatedResponse;

/// List books, optionally paged and sorted by year
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<BookDto>),
        (status = 400, description = "Invalid pagination")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    let sort_by_year = query.sort_by_year.unwrap_or(false);

    let books = match (query.page, query.books_per_page) {
        (None, None) => state.services.books.list_all(sort_by_year).await?,
        (page, per_page) => {
            state
                .services
                .books
                .list_page(page.unwrap_or(0), per_page.unwrap_or(0), sort_by_year)
                .await?
        }
    };

    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.find_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = CreatedResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    data.validate()?;
    let id = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update a book (owner is preserved)
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<BookDto>> {
    data.validate()?;
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lend a book to a person
#[utoipa::path(
    patch,
    path = "/books/{id}/add",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = AssignBook,
    responses(
        (status = 200, description = "Book assigned", body = BookDto),
        (status = 404, description = "Book or person not found")
    )
)]
pub async fn assign_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<AssignBook>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.assign(id, data.person_id).await?;
    Ok(Json(book))
}

/// Return a book to the shelf
#[utoipa::path(
    get,
    path = "/books/{id}/return",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.return_book(id).await?;
    Ok(Json(book))
}

/// Search books by name prefix
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookSearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookDto>),
        (status = 404, description = "Empty search term")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    let term = query.search_term.unwrap_or_default();
    let books = state.services.books.find_by_name_prefix(&term).await?;
    Ok(Json(books))
}

/// Search books by name prefix (form submission)
#[utoipa::path(
    post,
    path = "/books/search",
    tag = "books",
    params(BookSearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookDto>),
        (status = 404, description = "Empty search term")
    )
)]
pub async fn submit_search(
    state: State<crate::AppState>,
    query: Query<BookSearchQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    search_books(state, query).await
}
