//! Process-local stores. Nothing here outlives the server process.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::Config;
use crate::data::classroom::{ClassroomDraft, Classroom, DraftError};
use crate::data::student::{SessionError, StudentSession};
use crate::middleware::paging::PageState;

/// Bounds for stores whose entries are opened by anonymous requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_entries: usize,
    pub max_age: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_entries: 1000,
            max_age: Duration::hours(24),
        }
    }
}

impl Limits {
    pub fn from_config(c: &Config) -> Limits {
        Limits {
            max_entries: c.max_sessions,
            max_age: Duration::minutes(c.session_ttl_minutes),
        }
    }
}

// Drops expired entries, then the oldest ones until there is room for one more.
fn sweep<T>(
    entries: &mut HashMap<Uuid, T>,
    started: impl Fn(&T) -> DateTime<Utc>,
    limits: Limits,
    now: DateTime<Utc>,
) {
    let before = entries.len();
    let cutoff = now - limits.max_age;
    entries.retain(|_, it| started(it) > cutoff);

    while !entries.is_empty() && entries.len() >= limits.max_entries.max(1) {
        let oldest = entries
            .iter()
            .min_by_key(|(_, it)| started(*it))
            .map(|(id, _)| *id);
        match oldest {
            Some(id) => {
                entries.remove(&id);
            }
            None => break,
        }
    }

    let dropped = before - entries.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped stale entries");
    }
}

#[derive(Debug, Default)]
pub struct ClassroomStore {
    classrooms: RwLock<Vec<Classroom>>,
}

impl ClassroomStore {
    pub fn new() -> ClassroomStore {
        ClassroomStore::default()
    }

    pub async fn len(&self) -> usize {
        self.classrooms.read().await.len()
    }

    pub async fn insert(&self, classroom: Classroom) {
        tracing::info!(classroom = %classroom.id, title = %classroom.title, "created classroom");
        self.classrooms.write().await.push(classroom);
    }

    pub async fn get(&self, id: Uuid) -> Option<Classroom> {
        self.classrooms
            .read()
            .await
            .iter()
            .find(|it| it.id == id)
            .cloned()
    }

    /// One page of classrooms in creation order.
    pub async fn page(&self, page: PageState) -> Vec<Classroom> {
        let start = page.page as usize * page.page_length as usize;
        self.classrooms
            .read()
            .await
            .iter()
            .skip(start)
            .take(page.page_length as usize)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: Mutex<HashMap<Uuid, ClassroomDraft>>,
    limits: Limits,
}

impl DraftStore {
    pub fn new() -> DraftStore {
        DraftStore::default()
    }

    pub fn with_limits(limits: Limits) -> DraftStore {
        DraftStore {
            drafts: Mutex::default(),
            limits,
        }
    }

    pub async fn len(&self) -> usize {
        self.drafts.lock().await.len()
    }

    pub async fn open(&self) -> ClassroomDraft {
        self.open_at(Utc::now()).await
    }

    /// Opens a draft started at `now`, dropping expired or excess drafts first.
    pub async fn open_at(&self, now: DateTime<Utc>) -> ClassroomDraft {
        let mut draft = ClassroomDraft::new();
        draft.started = now;

        let mut drafts = self.drafts.lock().await;
        sweep(&mut drafts, |it| it.started, self.limits, now);
        drafts.insert(draft.id, draft.clone());
        tracing::debug!(draft = %draft.id, "opened classroom draft");
        draft
    }

    pub async fn get(&self, id: Uuid) -> Result<ClassroomDraft, DraftError> {
        self.drafts
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(DraftError::NotFound(id))
    }

    /// Runs `change` against a draft. The draft is only touched through `change`.
    pub async fn modify<T, F>(&self, id: Uuid, change: F) -> Result<T, DraftError>
    where
        F: FnOnce(&mut ClassroomDraft) -> Result<T, DraftError>,
    {
        let mut drafts = self.drafts.lock().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound(id))?;
        change(draft)
    }

    pub async fn remove(&self, id: Uuid) -> Result<ClassroomDraft, DraftError> {
        self.drafts
            .lock()
            .await
            .remove(&id)
            .ok_or(DraftError::NotFound(id))
    }

    /// Submits a draft into `classrooms`. The draft is dropped only on success.
    pub async fn submit(
        &self,
        id: Uuid,
        classrooms: &ClassroomStore,
    ) -> Result<Classroom, DraftError> {
        let mut drafts = self.drafts.lock().await;
        let draft = drafts.get(&id).ok_or(DraftError::NotFound(id))?;
        let classroom = draft.submit()?;
        drafts.remove(&id);
        drop(drafts);

        classrooms.insert(classroom.clone()).await;
        Ok(classroom)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, StudentSession>>,
    limits: Limits,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::default()
    }

    pub fn with_limits(limits: Limits) -> SessionStore {
        SessionStore {
            sessions: Mutex::default(),
            limits,
        }
    }

    pub async fn open(&self) -> StudentSession {
        self.open_at(Utc::now()).await
    }

    pub async fn open_at(&self, now: DateTime<Utc>) -> StudentSession {
        let mut session = StudentSession::new();
        session.started = now;

        let mut sessions = self.sessions.lock().await;
        sweep(&mut sessions, |it| it.started, self.limits, now);
        sessions.insert(session.id, session.clone());
        tracing::debug!(session = %session.id, "opened student session");
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<StudentSession, SessionError> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    pub async fn modify<T, F>(&self, id: Uuid, change: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut StudentSession) -> Result<T, SessionError>,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        change(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<StudentSession, SessionError> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .ok_or(SessionError::NotFound(id))
    }
}
