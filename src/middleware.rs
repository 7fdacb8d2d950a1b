//! 应用状态与 HTTP 中间件
//! 请求追踪（trace_id / request_id、日志、指标）

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    config::AppConfig,
    error::AppError,
    repository::{AccountRepository, PersonRepository, PublisherRepository},
    services::{AccountService, PersonService, PublisherService},
};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 启动时构建一次，之后只读，按 `Arc<AppState>` 在请求间共享。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: sqlx::PgPool,
    pub jwt_service: Arc<JwtService>,
    pub account_repo: AccountRepository,
    pub account_service: Arc<AccountService>,
    pub person_service: Arc<PersonService>,
    pub publisher_service: Arc<PublisherService>,
}

impl AppState {
    /// 组装仓储与服务
    pub fn build(config: AppConfig, db: sqlx::PgPool) -> Result<Self, AppError> {
        let query_timeout = Duration::from_secs(config.database.query_timeout_secs);

        let jwt_service = Arc::new(JwtService::from_config(&config)?);
        let hasher = Arc::new(PasswordHasher::new());

        let account_repo = AccountRepository::new(db.clone(), query_timeout);
        let person_repo = PersonRepository::new(db.clone(), query_timeout);
        let publisher_repo = PublisherRepository::new(db.clone(), query_timeout);

        let account_service = Arc::new(AccountService::new(
            account_repo.clone(),
            jwt_service.clone(),
            hasher,
        ));

        Ok(Self {
            config,
            db,
            jwt_service,
            account_repo,
            account_service,
            person_service: Arc::new(PersonService::new(person_repo)),
            publisher_service: Arc::new(PublisherService::new(publisher_repo)),
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!(
            "http_requests_total",
            "method" => method_label(method.as_str()),
            "status" => status_label(status)
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}

fn status_label(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
