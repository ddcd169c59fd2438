//! Repository layer for database operations
//!
//! [`BookStore`] and [`PersonStore`] are the storage ports the services talk
//! to; [`books::BooksRepository`] and [`people::PeopleRepository`] implement
//! them on PostgreSQL.

pub mod books;
pub mod people;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        book::{Assignment, Book, BookOrder, CreateBook, PageRequest, UpdateBook},
        person::{CreatePerson, Person, UpdatePerson},
    },
};

/// Storage port for books.
///
/// Lookups return `None` for unknown ids; turning that into an error is the
/// caller's decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self, order: BookOrder) -> AppResult<Vec<Book>>;

    async fn list_page(&self, page: PageRequest, order: BookOrder) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Books whose name starts with `prefix` (case-sensitive)
    async fn find_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<Book>>;

    /// Books currently held by a person
    async fn find_by_owner(&self, person_id: i32) -> AppResult<Vec<Book>>;

    /// Insert a shelved book, returning its id
    async fn create(&self, data: &CreateBook) -> AppResult<i32>;

    /// Replace name, author and year. Lending state is left untouched.
    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Lend a book. Reading the book, checking the person and writing the
    /// owner happen in one transaction with the book row locked.
    async fn assign(
        &self,
        book_id: i32,
        person_id: i32,
        taken_at: DateTime<Utc>,
    ) -> AppResult<Assignment>;

    /// Put a book back on the shelf
    async fn release(&self, book_id: i32) -> AppResult<Option<Book>>;
}

/// Storage port for people
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Person>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Person>>;

    /// Exact name match
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>>;

    async fn create(&self, data: &CreatePerson) -> AppResult<i32>;

    async fn update(&self, id: i32, data: &UpdatePerson) -> AppResult<Option<Person>>;

    /// Returns every held book to the shelf, then deletes the person.
    /// Returns `false` when the person did not exist.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub people: people::PeopleRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            people: people::PeopleRepository::new(pool.clone()),
            pool,
        }
    }
}
