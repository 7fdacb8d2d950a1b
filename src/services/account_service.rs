//! 账户服务：登录、注册、修改密码、令牌刷新

use crate::{
    auth::jwt::{JwtService, TokenKind, TokenPair},
    auth::password::PasswordHasher,
    error::AppError,
    models::account::Account,
    repository::AccountRepository,
};
use std::sync::Arc;

pub struct AccountService {
    accounts: AccountRepository,
    jwt_service: Arc<JwtService>,
    hasher: Arc<PasswordHasher>,
}

impl AccountService {
    pub fn new(
        accounts: AccountRepository,
        jwt_service: Arc<JwtService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            accounts,
            jwt_service,
            hasher,
        }
    }

    /// 用户登录
    ///
    /// 用户不存在与密码错误返回同一种错误，不暴露用户名是否存在。
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let account = match self.accounts.find_by_username(username).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                // 与密码校验耗时一致
                self.hasher.verify_dummy(password);
                tracing::info!(username, reason = "unknown_user", "Login failed");
                return Err(AppError::LoginFailed);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::info!(username, reason = "bad_password", "Login failed");
            return Err(AppError::LoginFailed);
        }

        let pair = self.jwt_service.issue_pair(&account.username)?;

        tracing::info!(account_id = account.id, username, "Login succeeded");

        Ok(pair)
    }

    /// 注册新账户
    pub async fn register(&self, username: &str, password: &str) -> Result<Account, AppError> {
        let password_hash = self.hasher.hash(password)?;
        let account = self.accounts.create(username, &password_hash).await?;

        tracing::info!(account_id = account.id, username, "Account registered");

        Ok(account)
    }

    /// 修改密码（重新哈希）
    pub async fn set_password(&self, account_id: i64, new_password: &str) -> Result<(), AppError> {
        let password_hash = self.hasher.hash(new_password)?;
        self.accounts.update_password(account_id, &password_hash).await?;

        tracing::info!(account_id, "Password changed");

        Ok(())
    }

    /// 使用刷新令牌换取新的令牌对
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt_service.verify(refresh_token, TokenKind::Refresh)?;

        let account = match self.accounts.find_by_username(&claims.sub).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => return Err(AppError::UserNotFound),
            Err(e) => return Err(e),
        };

        tracing::debug!(account_id = account.id, "Token pair refreshed");

        self.jwt_service.issue_pair(&account.username)
    }
}
