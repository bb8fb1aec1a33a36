use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ResultStore, StoreError};
use crate::models::session::AnalysisSession;
use crate::models::signal::AnalysisResult;

/// Process-local store for tests and runs without a database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sessions: RwLock<HashMap<String, AnalysisSession>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session(&self, session_id: &str) -> Option<AnalysisSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn save_session(&self, session: &AnalysisSession) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn load_results(&self, session_id: &str) -> Result<Vec<AnalysisResult>, StoreError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|session| session.results.clone())
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
    }
}
