//! Storage for the signed-in session.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use anyhow::Context;
use shared::protocol::AuthSession;
use tracing::{debug, error};

pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<AuthSession>;
    fn set(&self, session: AuthSession);
    fn clear(&self);

    /// A session only counts when it carries a token.
    fn active(&self) -> Option<AuthSession> {
        self.get().filter(AuthSession::has_token)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<AuthSession>>,
}

impl InMemorySessionStore {
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Option<AuthSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: AuthSession) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    fn clear(&self) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Keeps the session as JSON on disk so it survives between runs.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: InMemorySessionStore,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let cached = match fs::read(&path) {
            Ok(raw) => {
                let session: AuthSession = serde_json::from_slice(&raw).with_context(|| {
                    format!("failed to parse session file '{}'", path.display())
                })?;
                InMemorySessionStore::with_session(session)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => InMemorySessionStore::default(),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read session file '{}'", path.display())
                })
            }
        };

        Ok(Self { path, cached })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, session: &AuthSession) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory '{}'", parent.display())
            })?;
        }
        let raw = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file '{}'", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<AuthSession> {
        self.cached.get()
    }

    fn set(&self, session: AuthSession) {
        if let Err(err) = self.persist(&session) {
            error!(error = %err, "session kept in memory only");
        } else {
            debug!(path = %self.path.display(), "session saved");
        }
        self.cached.set(session);
    }

    fn clear(&self) {
        self.cached.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "session removed"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => error!(error = %err, path = %self.path.display(), "failed to remove session file"),
        }
    }
}
