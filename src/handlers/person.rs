//! 人员相关 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{
        ApiResponse, CreatePersonRequest, PersonFilter, PersonResponse, UpdatePersonRequest,
    },
    validation::{ValidatedJson, ValidatedPath, ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// GET /v1/persons?q=&s=&l=
pub async fn list_persons(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(filter): ValidatedQuery<PersonFilter>,
) -> Result<Json<ApiResponse<Vec<PersonResponse>>>, AppError> {
    let persons = state.person_service.list(&filter).await?;
    Ok(Json(ApiResponse::success("Persons retrieved", persons)))
}

/// POST /v1/persons
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePersonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PersonResponse>>), AppError> {
    let person = state.person_service.create(&req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Person created", person)),
    ))
}

/// GET /v1/persons/{id}
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<ApiResponse<PersonResponse>>, AppError> {
    let person = state.person_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success("Person retrieved", person)))
}

/// PUT /v1/persons/{id}
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePersonRequest>,
) -> Result<Json<ApiResponse<PersonResponse>>, AppError> {
    let person = state.person_service.update(id, &req).await?;
    Ok(Json(ApiResponse::success("Person updated", person)))
}
