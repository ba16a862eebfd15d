// handlers.rs
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use tracing::debug;
use axum::response::{Html, IntoResponse, Redirect, Response};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::VoteForm;
use crate::poll::{self, VoteOutcome};
use crate::state::AppState;
use crate::store::Store;
use crate::views;

// A malformed id can't name any question, so it is a plain 404.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// Latest published questions that have choices
pub async fn index<S: Store>(State(state): State<AppState<S>>) -> AppResult<Html<String>> {
    let now = state.now();
    let questions = poll::list_recent_questions(&state.store, now).await?;
    Ok(Html(views::index(&questions, now)))
}

/// One question with its voting form
pub async fn detail<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let question = poll::get_question_if_published(&state.store, id, state.now()).await?;
    let choices = state.store.choices_for(question.id).await?;
    Ok(Html(views::detail(&question, &choices, None)))
}

/// Vote counts of a question
pub async fn results<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let (question, choices) = poll::get_results(&state.store, id, state.now()).await?;
    Ok(Html(views::results(&question, &choices)))
}

/// Count a vote, then send the voter to the results page
pub async fn vote<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    // an unreadable body counts as no choice; the question lookup still decides 404
    let choice = match form {
        Ok(Form(form)) => form.choice,
        Err(rejection) => {
            debug!("Unreadable vote form: {rejection}");
            None
        }
    };

    match poll::cast_vote(&state.store, id, choice.as_deref()).await? {
        VoteOutcome::Redirect(question_id) => {
            Ok(Redirect::to(&views::results_url(question_id)).into_response())
        }
        VoteOutcome::Rejected {
            question,
            choices,
            message,
        } => Ok(Html(views::detail(&question, &choices, Some(message))).into_response()),
    }
}
