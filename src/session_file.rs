use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sellerdesk_shared::session::{PersistedSession, SessionStore};
use sellerdesk_shared::ApiError;
use tokio::fs;
use tracing::debug;

/// Keeps the session as a JSON document on disk.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage(err: std::io::Error) -> ApiError {
    ApiError::Session(err.to_string())
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> sellerdesk_shared::Result<Option<PersistedSession>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage(e)),
        };

        let session: PersistedSession = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), "Session loaded");
        Ok(Some(session))
    }

    async fn save(&self, session: &PersistedSession) -> sellerdesk_shared::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage)?;
        }

        let body = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, body).await.map_err(storage)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> sellerdesk_shared::Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage(e)),
        }
    }
}
