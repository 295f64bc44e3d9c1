//! Process-wide application state shared by every transport.
//!
//! The `TrackingService` sits behind a single `Mutex`. Each handler holds
//! the lock for one complete operation, which serializes ingestions (and
//! therefore guarantees at most one in-flight ingestion per case).

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{DatabaseLocation, ServerConfig};
use crate::db::{self, SqliteStore};
use crate::tracking::notify::{LogNotifier, Notifier};
use crate::tracking::provider::{AssessmentProvider, SimulatedProvider};
use crate::tracking::TrackingService;

pub struct CoreState {
    tracking: Mutex<TrackingService>,
}

impl CoreState {
    pub fn new(service: TrackingService) -> Self {
        Self {
            tracking: Mutex::new(service),
        }
    }

    /// Build state from server config with the default collaborators
    /// (simulated provider, log notifier).
    pub fn from_config(config: &ServerConfig) -> Result<Self, CoreError> {
        let conn = match &config.database {
            DatabaseLocation::File(path) => {
                tracing::info!(path = %path.display(), "Opening tracking database");
                db::open_database(path)?
            }
            DatabaseLocation::Memory => {
                tracing::warn!("Using in-memory database; data will not survive restart");
                db::open_memory_database()?
            }
        };
        Ok(Self::with_collaborators(
            conn,
            Arc::new(SimulatedProvider::default()),
            Arc::new(LogNotifier),
        ))
    }

    pub fn with_collaborators(
        conn: rusqlite::Connection,
        provider: Arc<dyn AssessmentProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(TrackingService::new(
            Box::new(SqliteStore::new(conn)),
            provider,
            notifier,
        ))
    }

    /// Acquire the tracking service for one unit of work.
    pub fn tracking(&self) -> Result<MutexGuard<'_, TrackingService>, CoreError> {
        self.tracking.lock().map_err(|_| CoreError::LockPoisoned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}
