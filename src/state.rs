use chrono::{DateTime, Utc};

use crate::store::Store;

/// Shared per-request state. `clock` supplies "now" to every visibility check.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub clock: fn() -> DateTime<Utc>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store, clock: Utc::now }
    }

    pub fn with_clock(store: S, clock: fn() -> DateTime<Utc>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
