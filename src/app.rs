// src/app.rs
use crate::config::AppConfig;
use crate::db::Database;
use crate::domain::{Clock, SystemClock};

/// Shared state handed to every request.
pub struct App {
    pub db: Database,
    pub config: AppConfig,
    pub clock: Box<dyn Clock>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            db: Database::new(config.db_path.clone()),
            config,
            clock,
        }
    }
}
