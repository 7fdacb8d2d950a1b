//! 出版商相关 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{ApiResponse, CreatePublisherRequest, PublisherResponse},
    validation::ValidatedJson,
};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// POST /v1/publishers
pub async fn create_publisher(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePublisherRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PublisherResponse>>), AppError> {
    let publisher = state.publisher_service.create(&req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Publisher created", publisher)),
    ))
}
