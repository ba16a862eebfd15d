// src/poll.rs
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Choice, Question};
use crate::store::Store;

/// Number of questions shown on the index page.
pub const LATEST_QUESTION_LIMIT: usize = 5;

pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

pub fn is_published(question: &Question, now: DateTime<Utc>) -> bool {
    question.publish_time <= now
}

/// True iff the question was published within the last day, both ends inclusive.
pub fn was_published_recently(question: &Question, now: DateTime<Utc>) -> bool {
    now - Duration::days(1) <= question.publish_time && question.publish_time <= now
}

/// Published questions that have at least one choice, newest first.
pub async fn list_recent_questions<S: Store>(store: &S, now: DateTime<Utc>) -> AppResult<Vec<Question>> {
    store.latest_with_choices(now, LATEST_QUESTION_LIMIT).await
}

/// Fails with `NotFound` both for unknown ids and for questions whose
/// publish time is still in the future.
pub async fn get_question_if_published<S: Store>(
    store: &S,
    id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Question> {
    store
        .find_question(id)
        .await?
        .filter(|q| is_published(q, now))
        .ok_or(AppError::NotFound)
}

pub async fn get_results<S: Store>(
    store: &S,
    id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<(Question, Vec<Choice>)> {
    let question = get_question_if_published(store, id, now).await?;
    let choices = store.choices_for(question.id).await?;
    Ok((question, choices))
}

#[derive(Debug)]
pub enum VoteOutcome {
    /// The vote was counted; show the results of this question.
    Redirect(Uuid),
    /// Nothing was counted; show the question again with `message`.
    Rejected {
        question: Question,
        choices: Vec<Choice>,
        message: &'static str,
    },
}

/// Records one vote for `choice_id` under `question_id`.
///
/// The question is looked up without a publish check, so questions that are
/// not yet visible still accept votes.
pub async fn cast_vote<S: Store>(
    store: &S,
    question_id: Uuid,
    choice_id: Option<&str>,
) -> AppResult<VoteOutcome> {
    let question = store
        .find_question(question_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(choice_id) = choice_id.and_then(|raw| Uuid::parse_str(raw.trim()).ok()) {
        if store.increment_votes(question.id, choice_id).await? {
            info!(%question_id, %choice_id, "Vote recorded");
            return Ok(VoteOutcome::Redirect(question.id));
        }
    }

    debug!(%question_id, ?choice_id, "Vote rejected");
    let choices = store.choices_for(question.id).await?;
    Ok(VoteOutcome::Rejected {
        question,
        choices,
        message: NO_CHOICE_SELECTED,
    })
}
