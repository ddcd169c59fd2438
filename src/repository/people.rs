//! People repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::PersonStore;
use crate::{
    error::AppResult,
    models::person::{CreatePerson, Person, UpdatePerson},
};

#[derive(Clone)]
pub struct PeopleRepository {
    pool: Pool<Postgres>,
}

impl PeopleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for PeopleRepository {
    async fn list(&self) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>("SELECT id, name FROM people ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(people)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>("SELECT id, name FROM people WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(person)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Person>> {
        let people =
            sqlx::query_as::<_, Person>("SELECT id, name FROM people WHERE name = $1 ORDER BY id")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        Ok(people)
    }

    async fn create(&self, data: &CreatePerson) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>("INSERT INTO people (name) VALUES ($1) RETURNING id")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, data: &UpdatePerson) -> AppResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            "UPDATE people SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(person)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Keep owner and taken_at cleared together
        sqlx::query("UPDATE books SET person_id = NULL, taken_at = NULL WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
