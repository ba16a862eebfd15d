mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::TestApp;
use polls::poll::{list_recent_questions, LATEST_QUESTION_LIMIT};
use polls::views::NO_POLLS_MESSAGE;

#[tokio::test]
async fn no_questions_shows_message() {
    let app = TestApp::new();
    let (status, body) = app.get("/polls/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(NO_POLLS_MESSAGE));
    assert!(list_recent_questions(&app.store, Utc::now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn past_question_with_choice_is_listed() {
    let app = TestApp::new();
    let question = app.question("Past question.", -30).await;
    app.choice(&question, "My past.").await;

    let listed = list_recent_questions(&app.store, Utc::now()).await.unwrap();
    assert_eq!(listed, vec![question.clone()]);

    let (_, body) = app.get("/polls/").await;
    assert!(body.contains("Past question."));
    assert!(body.contains(&format!("/polls/{}/", question.id)));
}

#[tokio::test]
async fn future_question_is_not_listed() {
    let app = TestApp::new();
    let question = app.question("Future question.", 30).await;
    app.choice(&question, "Someday.").await;

    let (_, body) = app.get("/polls/").await;
    assert!(body.contains(NO_POLLS_MESSAGE));
    assert!(!body.contains("Future question."));
}

#[tokio::test]
async fn only_past_questions_are_listed_alongside_future_ones() {
    let app = TestApp::new();
    let past = app.question("Past question.", -30).await;
    app.choice(&past, "My past.").await;
    let future = app.question("Future question.", 30).await;
    app.choice(&future, "My future.").await;

    let listed = list_recent_questions(&app.store, Utc::now()).await.unwrap();
    assert_eq!(listed, vec![past]);
}

#[tokio::test]
async fn two_past_questions_newest_first() {
    let app = TestApp::new();
    let older = app.question("Past question1.", -30).await;
    let newer = app.question("Past question2.", -5).await;
    app.choice(&older, "My past.").await;
    app.choice(&newer, "My past2.").await;

    let listed = list_recent_questions(&app.store, Utc::now()).await.unwrap();
    assert_eq!(listed, vec![newer, older]);
}

#[tokio::test]
async fn question_without_choices_is_hidden() {
    let app = TestApp::new();
    app.question("What's going on?", 0).await;

    let (_, body) = app.get("/polls/").await;
    assert!(!body.contains("What&#x27;s going on?"));
    assert!(body.contains(NO_POLLS_MESSAGE));
}

#[tokio::test]
async fn question_with_choice_is_shown() {
    let app = TestApp::new();
    let question = app.question("What's happening?", -1).await;
    app.choice(&question, "Don't know.").await;

    let listed = list_recent_questions(&app.store, Utc::now()).await.unwrap();
    assert_eq!(listed, vec![question]);
}

#[tokio::test]
async fn listing_is_capped() {
    let app = TestApp::new();
    for days in 1..=(LATEST_QUESTION_LIMIT as i64 + 2) {
        let question = app.question(&format!("Question {days}"), -days).await;
        app.choice(&question, "Sure").await;
    }

    let listed = list_recent_questions(&app.store, Utc::now()).await.unwrap();
    assert_eq!(listed.len(), LATEST_QUESTION_LIMIT);
    assert_eq!(listed[0].text, "Question 1");
    assert!(listed.windows(2).all(|w| w[0].publish_time >= w[1].publish_time));
}
