//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 无需访问令牌
    let account_routes = Router::new()
        .route("/v1/accounts/login", post(handlers::account::login))
        .route("/v1/accounts/refresh", post(handlers::account::refresh));

    // 需要访问令牌
    let authenticated_routes = Router::new()
        .route("/v1/accounts", get(handlers::account::get_profile))
        .route("/v1/accounts/password", put(handlers::account::change_password))
        .route(
            "/v1/persons",
            get(handlers::person::list_persons).post(handlers::person::create_person),
        )
        .route(
            "/v1/persons/{id}",
            get(handlers::person::get_person).put(handlers::person::update_person),
        )
        .route("/v1/publishers", post(handlers::publisher::create_publisher))
        // route_layer：只作用于已匹配的路由，未知路径仍返回 404
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    let max_body_bytes = state.config.server.max_body_kb * 1024;

    Router::new()
        .merge(public_routes)
        .merge(account_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
