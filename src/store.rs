// src/store.rs
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Choice, NewChoice, NewQuestion, Question};

/// Record store for questions and their choices.
///
/// A question exclusively owns its choices: deleting it deletes them.
pub trait Store: Clone + Send + Sync + 'static {
    fn create_question(
        &self,
        new: NewQuestion,
    ) -> impl Future<Output = AppResult<Question>> + Send;

    fn create_choice(
        &self,
        question_id: Uuid,
        new: NewChoice,
    ) -> impl Future<Output = AppResult<Choice>> + Send;

    /// Returns `false` when no question with `id` existed.
    fn delete_question(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;

    fn find_question(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Question>>> + Send;

    /// Choices of a question in creation order.
    fn choices_for(&self, question_id: Uuid) -> impl Future<Output = AppResult<Vec<Choice>>> + Send;

    /// Questions published at or before `now` that own at least one choice,
    /// newest first, at most `limit` of them.
    fn latest_with_choices(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> impl Future<Output = AppResult<Vec<Question>>> + Send;

    /// Adds one vote to `choice_id` as a single store operation. Returns
    /// `false` without touching anything if the choice does not belong to
    /// `question_id`.
    fn increment_votes(
        &self,
        question_id: Uuid,
        choice_id: Uuid,
    ) -> impl Future<Output = AppResult<bool>> + Send;
}

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
}

/// In-process store. Every operation runs under one lock, which makes
/// `increment_votes` atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    async fn create_question(&self, new: NewQuestion) -> AppResult<Question> {
        let question = Question {
            id: Uuid::new_v4(),
            text: new.text,
            publish_time: new.publish_time,
        };
        self.lock().questions.push(question.clone());
        Ok(question)
    }

    async fn create_choice(&self, question_id: Uuid, new: NewChoice) -> AppResult<Choice> {
        let mut tables = self.lock();
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::NotFound);
        }

        let choice = Choice {
            id: Uuid::new_v4(),
            question_id,
            text: new.text,
            vote_count: 0,
        };
        tables.choices.push(choice.clone());
        Ok(choice)
    }

    async fn delete_question(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock();
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        if tables.questions.len() == before {
            return Ok(false);
        }
        tables.choices.retain(|c| c.question_id != id);
        Ok(true)
    }

    async fn find_question(&self, id: Uuid) -> AppResult<Option<Question>> {
        Ok(self.lock().questions.iter().find(|q| q.id == id).cloned())
    }

    async fn choices_for(&self, question_id: Uuid) -> AppResult<Vec<Choice>> {
        Ok(self
            .lock()
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn latest_with_choices(&self, now: DateTime<Utc>, limit: usize) -> AppResult<Vec<Question>> {
        let tables = self.lock();
        let choice_count = |id: Uuid| tables.choices.iter().filter(|c| c.question_id == id).count();

        let mut questions: Vec<Question> = tables
            .questions
            .iter()
            .filter(|q| q.publish_time <= now && choice_count(q.id) > 0)
            .cloned()
            .collect();

        // stable, so equal publish times keep insertion order
        questions.sort_by(|a, b| b.publish_time.cmp(&a.publish_time));
        questions.truncate(limit);
        Ok(questions)
    }

    async fn increment_votes(&self, question_id: Uuid, choice_id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock();
        match tables
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id && c.question_id == question_id)
        {
            Some(choice) => {
                choice.vote_count = choice
                    .vote_count
                    .checked_add(1)
                    .ok_or(AppError::VoteCountOverflow(choice_id))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
