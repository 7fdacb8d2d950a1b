//! Account repository (数据库访问层)

use crate::{db, error::AppError, models::account::Account};
use sqlx::PgPool;
use std::time::Duration;

#[derive(Clone)]
pub struct AccountRepository {
    db: PgPool,
    query_timeout: Duration,
}

impl AccountRepository {
    pub fn new(db: PgPool, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    /// 根据用户名查找账户
    pub async fn find_by_username(&self, username: &str) -> Result<Account, AppError> {
        let query = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db);

        db::with_timeout(self.query_timeout, "accounts.find_by_username", query)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))
    }

    /// 创建账户
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<Account, AppError> {
        let query = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db);

        match db::with_timeout(self.query_timeout, "accounts.create", query).await {
            Err(AppError::Database(e)) if db::is_unique_violation(&e) => {
                Err(AppError::Conflict("Account".to_string()))
            }
            other => other,
        }
    }

    /// 更新密码哈希
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let query = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db);

        let result = db::with_timeout(self.query_timeout, "accounts.update_password", query).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Account".to_string()));
        }
        Ok(())
    }
}
