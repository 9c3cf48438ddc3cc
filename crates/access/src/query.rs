use std::time::Duration;

use moka::future::Cache;
use sellerdesk_shared::{ApiError, Role, Session, SessionUser, store::StoreUser};
use tracing::{debug, warn};

#[async_trait::async_trait]
pub trait StoreUserSource: Send + Sync {
    async fn store_users(&self, token: &str) -> sellerdesk_shared::Result<Vec<StoreUser>>;
}

#[async_trait::async_trait]
impl<T: StoreUserSource + ?Sized> StoreUserSource for std::sync::Arc<T> {
    async fn store_users(&self, token: &str) -> sellerdesk_shared::Result<Vec<StoreUser>> {
        (**self).store_users(token).await
    }
}

/// Finds the session user in the store's membership list, by id first and
/// then by email.
pub fn member_role(users: &[StoreUser], user: &SessionUser) -> Option<Role> {
    let by_id = users.iter().find(|u| !u.id.is_empty() && u.id == user.id);
    let member = by_id.or_else(|| {
        let email = user.email.as_deref()?;
        users.iter().find(|u| {
            u.email
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case(email))
        })
    })?;

    member.role()
}

/// Store-user role lookup keyed by token.
///
/// Concurrent callers for the same token share one request. Only successful
/// lookups are cached; a failed request resolves to `None` and is retried on
/// the next call.
pub struct StoreRoleQuery<S> {
    source: S,
    cache: Cache<String, Option<Role>>,
}

impl<S: StoreUserSource> StoreRoleQuery<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            cache: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
        }
    }

    pub async fn fetch(&self, session: &Session) -> Option<Role> {
        let (Some(token), Some(user)) = (session.token.as_deref(), session.user.as_ref()) else {
            return None;
        };

        let lookup = async {
            let users = self.source.store_users(token).await?;
            let role = member_role(&users, user);
            debug!(
                members = users.len(),
                role = ?role,
                "Store role fetched"
            );
            Ok::<_, ApiError>(role)
        };

        match self.cache.try_get_with(token.to_owned(), lookup).await {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, "Failed to fetch store users, falling back to coarse role");
                None
            }
        }
    }

    pub async fn invalidate(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}
