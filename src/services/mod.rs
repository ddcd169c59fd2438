//! Business logic services

pub mod books;
pub mod lending;
pub mod people;

use std::sync::Arc;

use crate::repository::{BookStore, PersonStore, Repository};

use lending::LendingPolicy;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub people: people::PeopleService,
}

impl Services {
    /// Create all services on top of the PostgreSQL repository
    pub fn new(repository: Repository, policy: LendingPolicy) -> Self {
        Self::with_stores(
            Arc::new(repository.books),
            Arc::new(repository.people),
            policy,
        )
    }

    /// Create all services on top of arbitrary storage
    pub fn with_stores(
        books: Arc<dyn BookStore>,
        people: Arc<dyn PersonStore>,
        policy: LendingPolicy,
    ) -> Self {
        Self {
            books: books::BooksService::new(books.clone(), policy),
            people: people::PeopleService::new(people, books, policy),
        }
    }
}
