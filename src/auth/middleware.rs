//! JWT 认证中间件
//!
//! 流程：提取 Bearer 令牌 → 校验访问令牌 → 按 sub 查找账户 → 写入 AuthContext。
//! 每个请求都重新校验，不保存会话状态。

use crate::{auth::jwt::TokenKind, error::AppError, middleware::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: i64,
    pub username: String,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::BearerTokenInvalid)
    }
}

/// 从 Authorization 头提取令牌，格式必须为 `Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::BearerTokenInvalid)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AppError::BearerTokenInvalid),
    }
}

/// JWT 认证中间件 - 必须认证
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = extract_bearer_token(req.headers())?;
        state.jwt_service.verify(token, TokenKind::Access)?
    };

    let account = match state.account_repo.find_by_username(&claims.sub).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => {
            tracing::warn!(subject = %claims.sub, "Token subject has no account");
            return Err(AppError::UserNotFound);
        }
        Err(e) => return Err(e),
    };

    req.extensions_mut().insert(AuthContext {
        account_id: account.id,
        username: account.username,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_token_valid() {
        let headers = headers("Bearer test_token_123");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "test_token_123");
    }

    #[test]
    fn test_extract_token_scheme_case_insensitive() {
        let headers = headers("bearer abc");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::BearerTokenInvalid)
        ));
    }

    #[test]
    fn test_extract_token_invalid_format() {
        for value in ["InvalidFormat", "Bearer", "Bearer ", "Basic abc", "Bearer a b"] {
            let headers = headers(value);
            assert!(
                matches!(extract_bearer_token(&headers), Err(AppError::BearerTokenInvalid)),
                "accepted {:?}",
                value
            );
        }
    }
}
