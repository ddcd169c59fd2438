//! API handlers for Shelfmark REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod people;

use axum::{
    routing::{get, patch},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Identifier assigned to a newly created record
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/search",
            get(books::search_books).post(books::submit_search),
        )
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/add", patch(books::assign_book))
        .route("/books/:id/return", get(books::return_book))
        // People
        .route("/people", get(people::list_people).post(people::create_person))
        .route(
            "/people/:id",
            get(people::get_person)
                .patch(people::update_person)
                .delete(people::delete_person),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        models::{
            book::{Assignment, BookOrder},
            Book,
        },
        repository::{MockBookStore, MockPersonStore},
        services::{lending::LendingPolicy, Services},
    };

    fn app(books: MockBookStore, people: MockPersonStore) -> Router {
        let services = Services::with_stores(
            Arc::new(books),
            Arc::new(people),
            LendingPolicy::default(),
        );
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(services),
            pool: None,
        })
    }

    fn dune() -> Book {
        Book {
            id: 1,
            name: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            person_id: None,
            taken_at: None,
        }
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_get_missing_book_is_404() {
        let mut books = MockBookStore::new();
        books.expect_get_by_id().with(eq(999)).returning(|_| Ok(None));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::GET,
            "/api/v1/books/999",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NoSuchBook");
        assert_eq!(body["code"], 5);
    }

    #[tokio::test]
    async fn test_list_without_paging_lists_everything() {
        let mut books = MockBookStore::new();
        books
            .expect_list()
            .with(eq(BookOrder::YearThenName))
            .times(1)
            .returning(|_| Ok(vec![dune()]));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::GET,
            "/api/v1/books?sort_by_year=true",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Dune");
        assert_eq!(body[0]["owner"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_with_paging() {
        let mut books = MockBookStore::new();
        books
            .expect_list_page()
            .times(1)
            .returning(|page, _| {
                assert_eq!((page.page(), page.size(), page.offset()), (1, 2, 2));
                Ok(Vec::new())
            });

        let (status, _) = send(
            app(books, MockPersonStore::new()),
            Method::GET,
            "/api/v1/books?page=1&books_per_page=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_huge_page_is_400() {
        let (status, body) = send(
            app(MockBookStore::new(), MockPersonStore::new()),
            Method::GET,
            "/api/v1/books?page=9223372036854775807&books_per_page=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadValue");
    }

    #[tokio::test]
    async fn test_invalid_book_is_rejected_before_storage() {
        // No create expectation: reaching storage would panic
        let (status, body) = send(
            app(MockBookStore::new(), MockPersonStore::new()),
            Method::POST,
            "/api/v1/books",
            Some(json!({ "name": "", "author": "Herbert", "year": 1965 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadValue");
    }

    #[tokio::test]
    async fn test_create_book_returns_id() {
        let mut books = MockBookStore::new();
        books
            .expect_create()
            .withf(|data| data.name == "Dune" && data.year == 1965)
            .returning(|_| Ok(1));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::POST,
            "/api/v1/books",
            Some(json!({ "name": "Dune", "author": "Herbert", "year": 1965 })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_empty_search_is_404() {
        let (status, _) = send(
            app(MockBookStore::new(), MockPersonStore::new()),
            Method::POST,
            "/api/v1/books/search?searchTerm=",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_by_prefix() {
        let mut books = MockBookStore::new();
        books
            .expect_find_by_name_prefix()
            .withf(|prefix| prefix == "Du")
            .returning(|_| Ok(vec![dune()]));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::GET,
            "/api/v1/books/search?searchTerm=Du",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_assign_then_return() {
        let mut books = MockBookStore::new();
        books
            .expect_assign()
            .withf(|book_id, person_id, _| *book_id == 1 && *person_id == 7)
            .returning(|_, person_id, taken_at| {
                Ok(Assignment::Assigned(Book {
                    person_id: Some(person_id),
                    taken_at: Some(taken_at),
                    ..dune()
                }))
            });
        books
            .expect_release()
            .with(eq(1))
            .returning(|_| Ok(Some(dune())));
        let app = app(books, MockPersonStore::new());

        let (status, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/v1/books/1/add",
            Some(json!({ "person_id": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["owner"], 7);
        assert!(body["taken_at"].is_string());

        let (status, body) = send(app, Method::GET, "/api/v1/books/1/return", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["owner"], Value::Null);
        assert_eq!(body["taken_at"], Value::Null);
        assert_eq!(body["expired"], false);
    }

    #[tokio::test]
    async fn test_assign_accepts_person_id_alias() {
        let mut books = MockBookStore::new();
        books
            .expect_assign()
            .withf(|_, person_id, _| *person_id == 3)
            .returning(|_, _, _| Ok(Assignment::PersonMissing));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::PATCH,
            "/api/v1/books/1/add",
            Some(json!({ "id": 3 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NoSuchPerson");
        assert_eq!(body["code"], 4);
    }

    #[tokio::test]
    async fn test_assign_missing_book_reports_book_code() {
        let mut books = MockBookStore::new();
        books
            .expect_assign()
            .returning(|_, _, _| Ok(Assignment::BookMissing));

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::PATCH,
            "/api/v1/books/42/add",
            Some(json!({ "person_id": 7 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NoSuchBook");
    }

    #[tokio::test]
    async fn test_update_ignores_owner_in_body() {
        let taken_at = Utc::now();
        let mut books = MockBookStore::new();
        books.expect_update().returning(move |_, data| {
            Ok(Some(Book {
                name: data.name.clone(),
                person_id: Some(7),
                taken_at: Some(taken_at),
                ..dune()
            }))
        });

        let (status, body) = send(
            app(books, MockPersonStore::new()),
            Method::PATCH,
            "/api/v1/books/1",
            Some(json!({
                "name": "Dune (revised)",
                "author": "Herbert",
                "year": 1965,
                "owner": null
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Dune (revised)");
        assert_eq!(body["owner"], 7);
    }

    #[tokio::test]
    async fn test_person_with_books() {
        let mut people = MockPersonStore::new();
        people.expect_get_by_id().with(eq(7)).returning(|_| {
            Ok(Some(crate::models::Person {
                id: 7,
                name: "Alice".to_string(),
            }))
        });
        let mut books = MockBookStore::new();
        books.expect_find_by_owner().with(eq(7)).returning(|_| {
            Ok(vec![Book {
                person_id: Some(7),
                taken_at: Some(Utc::now()),
                ..dune()
            }])
        });

        let (status, body) = send(app(books, people), Method::GET, "/api/v1/people/7", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["books"][0]["name"], "Dune");
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let (status, body) = send(
            app(MockBookStore::new(), MockPersonStore::new()),
            Method::GET,
            "/api/v1/ready",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}
