//! 账户相关 HTTP 处理器

use crate::{
    auth::{extract_bearer_token, AuthContext},
    error::AppError,
    middleware::AppState,
    models::{ApiResponse, ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse},
    validation::ValidatedJson,
};
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

/// POST /v1/accounts/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let pair = state.account_service.login(&req.uname, &req.paswd).await?;
    Ok(Json(ApiResponse::success("Login successful", pair.into())))
}

/// POST /v1/accounts/refresh
///
/// Authorization 头携带刷新令牌。
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let token = extract_bearer_token(&headers)?;
    let pair = state.account_service.refresh(token).await?;
    Ok(Json(ApiResponse::success("Token refreshed", pair.into())))
}

/// GET /v1/accounts
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let profile = state
        .person_service
        .get_account_profile(auth.account_id)
        .await?;
    Ok(Json(ApiResponse::success("Profile retrieved", profile)))
}

/// PUT /v1/accounts/password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .account_service
        .set_password(auth.account_id, &req.paswd)
        .await?;
    Ok(Json(ApiResponse::message("Password changed")))
}
