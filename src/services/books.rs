//! Book catalogue and lending service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Assignment, BookDto, BookOrder, CreateBook, PageRequest, UpdateBook},
        mapping::to_book_dtos,
        Book,
    },
    repository::BookStore,
};

use super::lending::LendingPolicy;

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    policy: LendingPolicy,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookStore>, policy: LendingPolicy) -> Self {
        Self { books, policy }
    }

    fn to_dto(&self, book: Book) -> BookDto {
        self.policy.apply(BookDto::from(book), Utc::now())
    }

    fn to_dtos(&self, books: Vec<Book>) -> Vec<BookDto> {
        let now = Utc::now();
        to_book_dtos(books)
            .into_iter()
            .map(|dto| self.policy.apply(dto, now))
            .collect()
    }

    /// List every book, ordered by (year, name) when `sort_by_year` is set
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self, sort_by_year: bool) -> AppResult<Vec<BookDto>> {
        let books = self.books.list(BookOrder::from_sort_flag(sort_by_year)).await?;
        tracing::debug!(count = books.len(), "Listed books");
        Ok(self.to_dtos(books))
    }

    /// List one zero-based page of books.
    ///
    /// `page == 0 && page_size == 0` means "no pagination" and lists everything.
    #[tracing::instrument(skip(self))]
    pub async fn list_page(
        &self,
        page: i64,
        page_size: i64,
        sort_by_year: bool,
    ) -> AppResult<Vec<BookDto>> {
        if page == 0 && page_size == 0 {
            return self.list_all(sort_by_year).await;
        }
        if page < 0 {
            return Err(AppError::BadRequest("page must not be negative".to_string()));
        }
        if page_size < 1 {
            return Err(AppError::BadRequest(
                "books_per_page must be at least 1".to_string(),
            ));
        }

        let request = PageRequest::new(page, page_size).ok_or_else(|| {
            AppError::BadRequest(format!(
                "page {} of {} books is out of range",
                page, page_size
            ))
        })?;

        let books = self
            .books
            .list_page(request, BookOrder::from_sort_flag(sort_by_year))
            .await?;
        Ok(self.to_dtos(books))
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> AppResult<BookDto> {
        self.books
            .get_by_id(id)
            .await?
            .map(|book| self.to_dto(book))
            .ok_or_else(|| book_not_found(id))
    }

    /// Prefix search on the book name. An empty prefix is rejected.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<BookDto>> {
        if prefix.is_empty() {
            return Err(AppError::BookNotFound(format!(
                "Book starts with '{}' not found",
                prefix
            )));
        }
        let books = self.books.find_by_name_prefix(prefix).await?;
        Ok(self.to_dtos(books))
    }

    pub async fn create(&self, data: &CreateBook) -> AppResult<i32> {
        let id = self.books.create(data).await?;
        tracing::info!(book_id = id, name = %data.name, "Book created");
        Ok(id)
    }

    /// Replace a book's descriptive fields, keeping its current owner
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<BookDto> {
        let book = self
            .books
            .update(id, data)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tracing::info!(book_id = id, "Book updated");
        Ok(self.to_dto(book))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.books.delete(id).await? {
            return Err(book_not_found(id));
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Lend a book to a person. A book already lent is handed over to the
    /// new person with a fresh `taken_at`.
    pub async fn assign(&self, book_id: i32, person_id: i32) -> AppResult<BookDto> {
        match self.books.assign(book_id, person_id, Utc::now()).await? {
            Assignment::Assigned(book) => {
                tracing::info!(book_id, person_id, "Book assigned");
                Ok(self.to_dto(book))
            }
            Assignment::BookMissing => Err(book_not_found(book_id)),
            Assignment::PersonMissing => Err(AppError::PersonNotFound(format!(
                "Person with id={} not found",
                person_id
            ))),
        }
    }

    /// Put a book back on the shelf
    pub async fn return_book(&self, id: i32) -> AppResult<BookDto> {
        let book = self
            .books
            .release(id)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tracing::info!(book_id = id, "Book returned");

        let mut dto = BookDto::from(book);
        dto.expired = false;
        Ok(dto)
    }
}

fn book_not_found(id: i32) -> AppError {
    AppError::BookNotFound(format!("Book with id={} not found", id))
}
