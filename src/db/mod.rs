//! Persistence of analysis sessions and their per-ticker results

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::session::AnalysisSession;
use crate::models::signal::AnalysisResult;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connection(String),
    #[error("database query failed: {0}")]
    Query(#[from] tokio_postgres::Error),
    #[error("failed to serialize {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("session '{0}' not found")]
    NotFound(String),
    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store a session with its results, replacing any earlier copy of the same session.
    async fn save_session(&self, session: &AnalysisSession) -> Result<(), StoreError>;

    /// Results of a stored session in the order they were analyzed.
    async fn load_results(&self, session_id: &str) -> Result<Vec<AnalysisResult>, StoreError>;
}
