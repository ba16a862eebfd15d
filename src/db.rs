// src/db.rs
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Choice, NewChoice, NewQuestion, Question};
use crate::store::Store;

pub async fn create_pool(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    Ok(pool)
}

/// Postgres-backed [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
        Ok(Self::new(create_pool(database_url, max_connections).await?))
    }
}

impl Store for PgStore {
    async fn create_question(&self, new: NewQuestion) -> AppResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, text, publish_time)
            VALUES ($1, $2, $3)
            RETURNING id, text, publish_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.text)
        .bind(new.publish_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    async fn create_choice(&self, question_id: Uuid, new: NewChoice) -> AppResult<Choice> {
        let result = sqlx::query_as::<_, Choice>(
            r#"
            INSERT INTO choices (id, question_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, question_id, text, vote_count
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(question_id)
        .bind(&new.text)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(choice) => Ok(choice),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(AppError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_question(&self, id: Uuid) -> AppResult<bool> {
        // choices go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_question(&self, id: Uuid) -> AppResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, text, publish_time FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn choices_for(&self, question_id: Uuid) -> AppResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, text, vote_count
            FROM choices
            WHERE question_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn latest_with_choices(&self, now: DateTime<Utc>, limit: usize) -> AppResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.id, q.text, q.publish_time
            FROM questions q
            JOIN choices c ON c.question_id = q.id
            WHERE q.publish_time <= $1
            GROUP BY q.id, q.text, q.publish_time, q.created_at
            HAVING COUNT(c.id) > 0
            ORDER BY q.publish_time DESC, q.created_at
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn increment_votes(&self, question_id: Uuid, choice_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE choices
            SET vote_count = vote_count + 1
            WHERE id = $1 AND question_id = $2
            "#,
        )
        .bind(choice_id)
        .bind(question_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
