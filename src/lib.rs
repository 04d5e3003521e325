//! Price-range estimator for photography bookings.
//!
//! Serves a single JSON endpoint that returns a bounded estimate and a
//! checklist, keeping the underlying rate table private to the server.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use config::Config;
use pricing::RateTable;

/// State shared by all handlers. Both parts are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rates: Arc<RateTable>,
}

impl AppState {
    pub fn new(config: Config, rates: RateTable) -> Self {
        Self {
            config: Arc::new(config),
            rates: Arc::new(rates),
        }
    }
}
