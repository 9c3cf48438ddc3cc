//! Signed-in identity and its lifecycle.

use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Result, Role};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    /// Coarse role handed out at login.
    pub role: Option<Role>,
}

/// What the persistence layer keeps between launches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
    pub is_loading: bool,
}

impl Session {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn signed_in(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            is_loading: false,
        }
    }

    pub fn coarse_role(&self) -> Option<&Role> {
        self.user.as_ref()?.role.as_ref()
    }

    /// A session is valid when it holds a token that has not expired.
    pub fn has_valid_token(&self) -> bool {
        self.token.as_deref().is_some_and(token_is_valid)
    }
}

impl From<PersistedSession> for Session {
    fn from(value: PersistedSession) -> Self {
        Self {
            token: value.token,
            user: value.user,
            is_loading: false,
        }
    }
}

#[derive(Deserialize)]
struct ExpiryClaims {
    exp: Option<u64>,
}

/// Opaque tokens are accepted as long as they are non-empty. JWTs are
/// additionally checked for an `exp` in the past; the signature belongs to
/// the backend and is not verified here.
pub fn token_is_valid(token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return false;
    }

    if token.split('.').count() != 3 {
        return true;
    }

    match insecure_decode::<ExpiryClaims>(token) {
        Ok(data) => match data.claims.exp {
            Some(exp) => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                exp > now
            }
            None => true,
        },
        Err(e) => {
            debug!(error = %e, "Token looks like a JWT but could not be decoded");
            false
        }
    }
}

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<PersistedSession>>;

    async fn save(&self, session: &PersistedSession) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Owner of the session. Everything else reads snapshots through
/// [`AuthContext::session`].
pub struct AuthContext<S> {
    store: S,
    state: RwLock<Session>,
}

impl<S: SessionStore> AuthContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RwLock::new(Session::loading()),
        }
    }

    pub fn session(&self) -> Session {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, session: Session) {
        match self.state.write() {
            Ok(mut state) => *state = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    /// Loads the persisted session. A store that cannot be read leaves the
    /// user signed out.
    pub async fn init(&self) -> Session {
        let session = match self.store.load().await {
            Ok(Some(persisted)) => Session::from(persisted),
            Ok(None) => Session::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted session");
                Session::default()
            }
        };

        info!(
            signed_in = session.token.is_some(),
            "Session initialized"
        );

        self.replace(session.clone());
        session
    }

    pub async fn login(&self, token: impl Into<String>, user: SessionUser) -> Result<Session> {
        let session = Session::signed_in(token, user);
        self.store
            .save(&PersistedSession {
                token: session.token.clone(),
                user: session.user.clone(),
            })
            .await?;

        self.replace(session.clone());
        Ok(session)
    }

    pub async fn logout(&self) -> Result<()> {
        self.replace(Session::default());
        self.store.clear().await
    }
}
