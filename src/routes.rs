// routes.rs
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::store::Store;

pub fn create_routes<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/polls/", get(handlers::index::<S>))
        .route("/polls/{id}/", get(handlers::detail::<S>))
        .route("/polls/{id}/results/", get(handlers::results::<S>))
        .route("/polls/{id}/vote/", post(handlers::vote::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
