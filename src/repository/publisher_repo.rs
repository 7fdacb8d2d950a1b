//! Publisher repository

use crate::{db, error::AppError, models::publisher::Publisher};
use sqlx::PgPool;
use std::time::Duration;

#[derive(Clone)]
pub struct PublisherRepository {
    db: PgPool,
    query_timeout: Duration,
}

impl PublisherRepository {
    pub fn new(db: PgPool, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    pub async fn create(&self, name: &str, city: &str) -> Result<Publisher, AppError> {
        let query = sqlx::query_as::<_, Publisher>(
            r#"
            INSERT INTO publishers (name, city)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(city)
        .fetch_one(&self.db);

        match db::with_timeout(self.query_timeout, "publishers.create", query).await {
            Err(AppError::Database(e)) if db::is_unique_violation(&e) => {
                Err(AppError::Conflict("Publisher".to_string()))
            }
            other => other,
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Publisher, AppError> {
        let query = sqlx::query_as::<_, Publisher>("SELECT * FROM publishers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db);

        db::with_timeout(self.query_timeout, "publishers.find_by_id", query)
            .await?
            .ok_or_else(|| AppError::NotFound("Publisher".to_string()))
    }
}
