//! Books repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Assignment, Book, BookOrder, CreateBook, PageRequest, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, name, author, year, person_id, taken_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the user input only ever matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, order: BookOrder) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY {}", BOOK_COLUMNS, order.as_sql());
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn list_page(&self, page: PageRequest, order: BookOrder) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books ORDER BY {} LIMIT $1 OFFSET $2",
            BOOK_COLUMNS,
            order.as_sql()
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(page.size())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let query = format!(
            r"SELECT {} FROM books WHERE name LIKE $1 ESCAPE '\' ORDER BY id",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(format!("{}%", escape_like(prefix)))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_owner(&self, person_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE person_id = $1 ORDER BY taken_at, id",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (name, author, year)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.author)
        .bind(data.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>> {
        let query = format!(
            "UPDATE books SET name = $2, author = $3, year = $4 WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&data.name)
            .bind(&data.author)
            .bind(data.year)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn assign(
        &self,
        book_id: i32,
        person_id: i32,
        taken_at: DateTime<Utc>,
    ) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        // Concurrent assigns of the same book queue up here
        let locked: Option<i32> =
            sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(Assignment::BookMissing);
        }

        // FOR SHARE keeps the person from being deleted before commit
        let person: Option<i32> =
            sqlx::query_scalar("SELECT id FROM people WHERE id = $1 FOR SHARE")
                .bind(person_id)
                .fetch_optional(&mut *tx)
                .await?;
        if person.is_none() {
            return Ok(Assignment::PersonMissing);
        }

        let query = format!(
            "UPDATE books SET person_id = $2, taken_at = $3 WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_id)
            .bind(person_id)
            .bind(taken_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Assignment::Assigned(book))
    }

    async fn release(&self, book_id: i32) -> AppResult<Option<Book>> {
        let query = format!(
            "UPDATE books SET person_id = NULL, taken_at = NULL WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }
}
