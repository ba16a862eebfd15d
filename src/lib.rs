//! A small polling site: published questions, their choices, votes and results.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod poll;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

pub use db::PgStore;
pub use error::{AppError, AppResult};
pub use state::AppState;
pub use store::{MemoryStore, Store};
