// models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const QUESTION_TEXT_MAX: usize = 200;
pub const CHOICE_TEXT_MAX: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub publish_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub vote_count: i32,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validated input for creating a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub publish_time: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(text: impl Into<String>, publish_time: DateTime<Utc>) -> AppResult<Self> {
        let text = validate_text("question", text.into(), QUESTION_TEXT_MAX)?;
        Ok(Self { text, publish_time })
    }
}

/// Validated input for creating a choice under a question.
#[derive(Debug, Clone)]
pub struct NewChoice {
    pub text: String,
}

impl NewChoice {
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = validate_text("choice", text.into(), CHOICE_TEXT_MAX)?;
        Ok(Self { text })
    }
}

fn validate_text(subject: &str, text: String, max: usize) -> AppResult<String> {
    let len = text.chars().count();
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!("{subject} text must not be empty")));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{subject} text must be at most {max} characters, got {len}"
        )));
    }
    Ok(text)
}

/// Body of `POST /polls/{id}/vote/`.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}
