#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use polls::models::{Choice, NewChoice, NewQuestion, Question};
use polls::routes::create_routes;
use polls::{AppState, MemoryStore, Store};
use tower::ServiceExt;

pub struct TestApp {
    pub store: MemoryStore,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let router = create_routes(AppState::new(store.clone()));
        Self { store, router }
    }

    /// App whose handlers see `clock()` as the current time.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        let store = MemoryStore::new();
        let router = create_routes(AppState::with_clock(store.clone(), clock));
        Self { store, router }
    }

    /// Question published `days` from now (negative for the past).
    pub async fn question(&self, text: &str, days: i64) -> Question {
        let publish_time = Utc::now() + Duration::days(days);
        self.store
            .create_question(NewQuestion::new(text, publish_time).expect("valid question"))
            .await
            .expect("create question")
    }

    pub async fn choice(&self, question: &Question, text: &str) -> Choice {
        self.store
            .create_choice(question.id, NewChoice::new(text).expect("valid choice"))
            .await
            .expect("create choice")
    }

    pub async fn votes(&self, question: &Question) -> Vec<i32> {
        self.store
            .choices_for(question.id)
            .await
            .expect("load choices")
            .iter()
            .map(|c| c.vote_count)
            .collect()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, String, Option<String>) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, String::from_utf8_lossy(&body).into_owned(), location)
    }

    /// POST with no content type and an empty body.
    pub async fn post_bare(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::post(uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, String::from_utf8_lossy(&body).into_owned())
    }
}
