//! Access control service for the signed-in seller.
//!
//! Combines the session owner with the role resolver so callers get one
//! answer per check. Order of evaluation:
//! 1. Session gate (no valid token resets navigation to the login screen)
//! 2. Role resolution (store-user role wins over the coarse login role)
//! 3. Feature requirement (permission, then role, then role list)

use std::sync::Arc;

use sellerdesk_access::{
    AccessDeniedModal, Decision, FeatureGate, Requirement, RoleAccess, RoleAccessResolver,
    SessionDecision, SessionGate, SessionView, StoreRoleQuery, StoreUserSource,
};
use sellerdesk_shared::{AuthContext, Navigator, Session, SessionStore};
use tracing::{debug, info};

use crate::config::AccessConfig;

/// Outcome of one access check.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessCheck {
    pub session: SessionDecision,
    pub access: RoleAccess,
    pub decision: Decision,
    pub modal: AccessDeniedModal,
}

impl AccessCheck {
    pub fn granted(&self) -> bool {
        self.session == SessionDecision::Valid && self.decision == Decision::Granted
    }
}

pub struct AccessControlService<S, U> {
    auth: Arc<AuthContext<S>>,
    resolver: RoleAccessResolver<U>,
}

impl<S: SessionStore, U: StoreUserSource> AccessControlService<S, U> {
    pub fn new(auth: Arc<AuthContext<S>>, source: U, config: &AccessConfig) -> Self {
        let query = StoreRoleQuery::new(source, config.store_role_cache_ttl());
        Self {
            auth,
            resolver: RoleAccessResolver::new(query),
        }
    }

    pub fn auth(&self) -> &AuthContext<S> {
        &self.auth
    }

    pub fn session(&self) -> Session {
        self.auth.session()
    }

    pub async fn role_access(&self) -> RoleAccess {
        self.resolver.resolve(&self.auth.session()).await
    }

    /// Runs the session gate and, for a valid session, the feature gate with
    /// the denial dialog enabled.
    pub async fn check(&self, requirement: Requirement, navigator: &dyn Navigator) -> AccessCheck {
        let session = self.auth.session();
        let mut session_gate = SessionGate::new();

        if let SessionView::Children(()) = session_gate.render(&session, navigator, || ()) {
            let access = self.resolver.resolve(&session).await;
            let mut gate = FeatureGate::new(requirement).show_modal(true);
            let decision = gate.sync(&access);

            info!(
                required = ?gate.requirement().label(),
                effective_role = ?access.effective_role,
                decision = ?decision,
                "Access check"
            );

            return AccessCheck {
                session: SessionDecision::Valid,
                access,
                decision,
                modal: gate.modal().clone(),
            };
        }

        let decision = SessionGate::decide(&session);
        debug!(session = ?decision, "Access check stopped at session gate");
        AccessCheck {
            session: decision,
            access: RoleAccess::compute(&session, None),
            decision: Decision::Pending,
            modal: AccessDeniedModal::default(),
        }
    }

    /// Drops cached store-role lookups for the current token.
    pub async fn refresh(&self) {
        if let Some(token) = self.auth.session().token {
            self.resolver.query().invalidate(&token).await;
        }
    }
}
