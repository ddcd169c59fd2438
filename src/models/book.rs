//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book row from database
///
/// `person_id` and `taken_at` are either both set (lent) or both null (shelved).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub year: i32,
    pub person_id: Option<i32>,
    pub taken_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_lent(&self) -> bool {
        self.person_id.is_some()
    }
}

/// Book as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub name: String,
    pub author: String,
    /// Year of publication
    pub year: i32,
    /// Id of the person currently holding the book
    pub owner: Option<i32>,
    pub taken_at: Option<DateTime<Utc>>,
    /// Held longer than the loan period (computed, never stored)
    pub expired: bool,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(range(min = 0, max = 9999, message = "Year must be between 0 and 9999"))]
    pub year: i32,
}

/// Update book request
///
/// Full replacement of the descriptive fields. Lending state is not part of
/// the payload, so an edit never clears the current owner.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(range(min = 0, max = 9999, message = "Year must be between 0 and 9999"))]
    pub year: i32,
}

/// Assign book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignBook {
    #[serde(alias = "id")]
    pub person_id: i32,
}

/// Book listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookListQuery {
    /// Zero-based page number
    pub page: Option<i64>,
    pub books_per_page: Option<i64>,
    /// Order by (year, name) instead of storage order
    pub sort_by_year: Option<bool>,
}

/// Prefix search query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookSearchQuery {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// Ordering applied to book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookOrder {
    #[default]
    Storage,
    YearThenName,
}

impl BookOrder {
    pub fn from_sort_flag(sort_by_year: bool) -> Self {
        if sort_by_year {
            BookOrder::YearThenName
        } else {
            BookOrder::Storage
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            BookOrder::Storage => "id",
            BookOrder::YearThenName => "year, name, id",
        }
    }
}

/// One zero-based page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
    offset: i64,
}

impl PageRequest {
    /// `None` unless `page >= 0`, `size >= 1` and the row offset fits in an i64
    pub fn new(page: i64, size: i64) -> Option<Self> {
        if page < 0 || size < 1 {
            return None;
        }
        let offset = page.checked_mul(size)?;
        Some(Self { page, size, offset })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}


/// Result of an assignment attempt, decided inside one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Assigned(Book),
    BookMissing,
    PersonMissing,
}
