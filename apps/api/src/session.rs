//! In-memory session store.
//!
//! A session holds one optional job description plus uploaded resumes, and
//! nothing survives the process. Sessions expire after a TTL; expiry is
//! enforced lazily on access and purged on create.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::Document;
use crate::models::matching::SkippedFile;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub job: Option<Document>,
    pub resumes: Vec<Document>,
    /// Files that failed ingestion, kept so later rankings can report them.
    pub skipped: Vec<SkippedFile>,
    pub created_at: DateTime<Utc>,
    pub last_touched: DateTime<Utc>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Session {
            id,
            job: None,
            resumes: Vec::new(),
            skipped: Vec::new(),
            created_at: now,
            last_touched: now,
        }
    }

    fn expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_touched >= ttl
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        SessionStore {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Creates a session, purging expired ones while the write lock is held.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.inner.write().await;
        let now = Utc::now();
        sessions.retain(|_, s| !s.expired(self.ttl, now));
        sessions.insert(id, Session::new(id));
        tracing::info!(session_id = %id, active = sessions.len(), "session created");
        id
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        sessions
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "session deleted"))
            .ok_or_else(|| AppError::NotFound(format!("session {id} not found")))
    }

    /// Returns a clone of the session, refreshing its TTL.
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        let mut sessions = self.inner.write().await;
        let session = live_session(&mut sessions, id, self.ttl)?;
        session.last_touched = Utc::now();
        Ok(session.clone())
    }

    /// Replaces the session's job description document.
    pub async fn set_job(&self, id: Uuid, doc: Document) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = live_session(&mut sessions, id, self.ttl)?;
        session.job = Some(doc);
        session.last_touched = Utc::now();
        Ok(())
    }

    /// Appends resume documents (preserving upload order) and records any
    /// files the batch skipped.
    pub async fn add_resumes(
        &self,
        id: Uuid,
        docs: Vec<Document>,
        skipped: Vec<SkippedFile>,
    ) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = live_session(&mut sessions, id, self.ttl)?;
        session.resumes.extend(docs);
        session.skipped.extend(skipped);
        session.last_touched = Utc::now();
        Ok(())
    }
}

/// Looks up a session, removing it if the TTL has lapsed.
fn live_session(
    sessions: &mut HashMap<Uuid, Session>,
    id: Uuid,
    ttl: Duration,
) -> Result<&mut Session, AppError> {
    let expired = sessions
        .get(&id)
        .map(|s| s.expired(ttl, Utc::now()))
        .unwrap_or(false);
    if expired {
        sessions.remove(&id);
        tracing::debug!(session_id = %id, "session expired");
    }
    sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("session {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{ContactInfo, Document, DocumentFormat};

    fn make_doc(filename: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            format: DocumentFormat::Txt,
            text: "text".to_string(),
            contact: ContactInfo::default(),
            clients: vec![],
            embedding: vec![1.0],
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_snapshot() {
        let store = SessionStore::new(3600);
        let id = store.create().await;

        let session = store.snapshot(id).await.unwrap();
        assert_eq!(session.id, id);
        assert!(session.job.is_none());
        assert!(session.resumes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(3600);
        let err = store.snapshot(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let store = SessionStore::new(3600);
        let id = store.create().await;

        store.delete(id).await.unwrap();
        assert!(store.snapshot(id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_session_is_not_found() {
        let store = SessionStore::new(3600);
        assert!(store.delete(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_resumes_keep_upload_order() {
        let store = SessionStore::new(3600);
        let id = store.create().await;

        store
            .add_resumes(id, vec![make_doc("a.txt"), make_doc("b.txt")], vec![])
            .await
            .unwrap();
        store
            .add_resumes(id, vec![make_doc("c.txt")], vec![])
            .await
            .unwrap();

        let session = store.snapshot(id).await.unwrap();
        let names: Vec<&str> = session.resumes.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_set_job_replaces_previous() {
        let store = SessionStore::new(3600);
        let id = store.create().await;

        store.set_job(id, make_doc("old.txt")).await.unwrap();
        store.set_job(id, make_doc("new.txt")).await.unwrap();

        let session = store.snapshot(id).await.unwrap();
        assert_eq!(session.job.unwrap().filename, "new.txt");
    }

    #[tokio::test]
    async fn test_skipped_files_accumulate_across_batches() {
        let store = SessionStore::new(3600);
        let id = store.create().await;

        store
            .add_resumes(
                id,
                vec![make_doc("good.txt")],
                vec![SkippedFile {
                    filename: "bad.pdf".to_string(),
                    reason: "PDF extraction failed".to_string(),
                }],
            )
            .await
            .unwrap();
        store
            .add_resumes(
                id,
                vec![],
                vec![SkippedFile {
                    filename: "worse.docx".to_string(),
                    reason: "DOCX open failed".to_string(),
                }],
            )
            .await
            .unwrap();

        let session = store.snapshot(id).await.unwrap();
        let names: Vec<&str> = session.skipped.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["bad.pdf", "worse.docx"]);
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let store = SessionStore::new(0);
        let id = store.create().await;

        let err = store.snapshot(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
