//! People endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::person::{CreatePerson, PersonDto, PersonQuery, UpdatePerson},
};

use super::CreatedResponse;

/// List people, optionally filtered by exact name
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    params(PersonQuery),
    responses(
        (status = 200, description = "List of people", body = Vec<PersonDto>)
    )
)]
pub async fn list_people(
    State(state): State<crate::AppState>,
    Query(query): Query<PersonQuery>,
) -> AppResult<Json<Vec<PersonDto>>> {
    let people = match query.name {
        Some(name) => state.services.people.find_by_name(&name).await?,
        None => state.services.people.find_all().await?,
    };
    Ok(Json(people))
}

/// Get person by ID, with the books they hold
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = PersonDto),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PersonDto>> {
    let person = state.services.people.find_by_id_with_books(id).await?;
    Ok(Json(person))
}

/// Create a person
#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    request_body = CreatePerson,
    responses(
        (status = 201, description = "Person created", body = CreatedResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_person(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    data.validate()?;
    let id = state.services.people.save(&data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update a person
#[utoipa::path(
    patch,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    request_body = UpdatePerson,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 404, description = "Person not found")
    )
)]
pub async fn update_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePerson>,
) -> AppResult<Json<PersonDto>> {
    data.validate()?;
    let person = state.services.people.update(id, &data).await?;
    Ok(Json(person))
}

/// Delete a person; books they hold go back on the shelf
#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person not found")
    )
)]
pub async fn delete_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.people.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
