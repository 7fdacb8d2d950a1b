//! Person repository

use crate::{db, error::AppError, models::person::Person};
use chrono::NaiveDate;
use sqlx::PgPool;
use std::time::Duration;

/// 新建人员所需字段
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub account_id: Option<i64>,
    pub fullname: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// 人员更新字段
#[derive(Debug, Clone)]
pub struct PersonChanges {
    pub fullname: String,
    pub gender: String,
    pub birth_date: NaiveDate,
}

#[derive(Clone)]
pub struct PersonRepository {
    db: PgPool,
    query_timeout: Duration,
}

impl PersonRepository {
    pub fn new(db: PgPool, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    pub async fn create(&self, person: &NewPerson) -> Result<Person, AppError> {
        let query = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO persons (account_id, fullname, gender, birth_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(person.account_id)
        .bind(&person.fullname)
        .bind(&person.gender)
        .bind(person.birth_date)
        .fetch_one(&self.db);

        match db::with_timeout(self.query_timeout, "persons.create", query).await {
            // account_id 唯一：一个账户最多关联一个人员
            Err(AppError::Database(e)) if db::is_unique_violation(&e) => {
                Err(AppError::Conflict("Person for this account".to_string()))
            }
            Err(AppError::Database(e)) if db::is_foreign_key_violation(&e) => {
                Err(AppError::NotFound("Account".to_string()))
            }
            other => other,
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Person, AppError> {
        let query = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db);

        db::with_timeout(self.query_timeout, "persons.find_by_id", query)
            .await?
            .ok_or_else(|| AppError::NotFound("Person".to_string()))
    }

    /// 查找账户关联的人员
    pub async fn find_by_account_id(&self, account_id: i64) -> Result<Person, AppError> {
        let query = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.db);

        db::with_timeout(self.query_timeout, "persons.find_by_account_id", query)
            .await?
            .ok_or_else(|| AppError::NotFound("Person".to_string()))
    }

    /// 按姓名关键字分页查询，按姓名升序
    ///
    /// `pattern` 为已转义的 LIKE 模式，None 时不过滤。
    pub async fn list(
        &self,
        pattern: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Person>, AppError> {
        let query = sqlx::query_as::<_, Person>(
            r#"
            SELECT * FROM persons
            WHERE ($1::TEXT IS NULL OR fullname ILIKE $1)
            ORDER BY fullname ASC, id ASC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.db);

        db::with_timeout(self.query_timeout, "persons.list", query).await
    }

    pub async fn update(&self, id: i64, changes: &PersonChanges) -> Result<Person, AppError> {
        let query = sqlx::query_as::<_, Person>(
            r#"
            UPDATE persons
            SET fullname = $2, gender = $3, birth_date = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.fullname)
        .bind(&changes.gender)
        .bind(changes.birth_date)
        .fetch_optional(&self.db);

        db::with_timeout(self.query_timeout, "persons.update", query)
            .await?
            .ok_or_else(|| AppError::NotFound("Person".to_string()))
    }
}
