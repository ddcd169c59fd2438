//! People (borrowers) service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        mapping::{to_book_dtos, to_person_dtos},
        person::{CreatePerson, PersonDto, UpdatePerson},
    },
    repository::{BookStore, PersonStore},
};

use super::lending::LendingPolicy;

#[derive(Clone)]
pub struct PeopleService {
    people: Arc<dyn PersonStore>,
    books: Arc<dyn BookStore>,
    policy: LendingPolicy,
}

impl PeopleService {
    pub fn new(
        people: Arc<dyn PersonStore>,
        books: Arc<dyn BookStore>,
        policy: LendingPolicy,
    ) -> Self {
        Self {
            people,
            books,
            policy,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<PersonDto>> {
        Ok(to_person_dtos(self.people.list().await?))
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> AppResult<PersonDto> {
        self.people
            .get_by_id(id)
            .await?
            .map(PersonDto::from)
            .ok_or_else(|| person_not_found(id))
    }

    /// Person with the books they currently hold
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id_with_books(&self, id: i32) -> AppResult<PersonDto> {
        let mut person = self.find_by_id(id).await?;

        let now = Utc::now();
        person.books = to_book_dtos(self.books.find_by_owner(id).await?)
            .into_iter()
            .map(|book| self.policy.apply(book, now))
            .collect();
        tracing::debug!(person_id = id, books = person.books.len(), "Loaded held books");

        Ok(person)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<PersonDto>> {
        Ok(to_person_dtos(self.people.find_by_name(name).await?))
    }

    pub async fn save(&self, data: &CreatePerson) -> AppResult<i32> {
        let id = self.people.create(data).await?;
        tracing::info!(person_id = id, "Person created");
        Ok(id)
    }

    /// Replace a person's fields. Unknown ids are not created.
    pub async fn update(&self, id: i32, data: &UpdatePerson) -> AppResult<PersonDto> {
        let person = self
            .people
            .update(id, data)
            .await?
            .ok_or_else(|| person_not_found(id))?;
        tracing::info!(person_id = id, "Person updated");
        Ok(PersonDto::from(person))
    }

    /// Delete a person, returning any books they held to the shelf
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.people.delete(id).await? {
            return Err(person_not_found(id));
        }
        tracing::info!(person_id = id, "Person deleted");
        Ok(())
    }
}

fn person_not_found(id: i32) -> AppError {
    AppError::PersonNotFound(format!("Person with id={} not found", id))
}
