//! Render-or-deny wrappers over [`RoleAccess`] and [`Session`].
//!
//! Each gate separates a pure decision (`decide`) from the step that applies
//! it (`render`), which is where modal state changes and navigation happen.
//!
//! [`Session`]: sellerdesk_shared::Session

mod feature;
mod screen;
mod session;

pub use feature::FeatureGate;
pub use screen::{ScreenGate, ScreenView};
pub use session::{SessionDecision, SessionGate, SessionView};

use sellerdesk_shared::{Permission, Role};

use crate::RoleAccess;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Pending,
    Granted,
    Denied,
}

/// What a gate asks of the current user. When several shapes are set the
/// permission wins, then the single role, then the role list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Requirement {
    pub permission: Option<Permission>,
    pub role: Option<Role>,
    pub roles: Vec<Role>,
}

impl Requirement {
    pub fn permission(permission: Permission) -> Self {
        Self {
            permission: Some(permission),
            ..Default::default()
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_met(&self, access: &RoleAccess) -> bool {
        if let Some(permission) = self.permission {
            access.has_permission(permission)
        } else if let Some(role) = &self.role {
            access.has_role(role)
        } else if !self.roles.is_empty() {
            access.has_any_role(&self.roles)
        } else {
            true
        }
    }

    pub fn decide(&self, access: &RoleAccess) -> Decision {
        if access.is_loading {
            Decision::Pending
        } else if self.is_met(access) {
            Decision::Granted
        } else {
            Decision::Denied
        }
    }

    /// Human-readable form shown in the denial dialog.
    pub fn label(&self) -> Option<String> {
        if let Some(permission) = self.permission {
            Some(permission.to_string())
        } else if let Some(role) = &self.role {
            Some(role.to_string())
        } else if !self.roles.is_empty() {
            Some(
                self.roles
                    .iter()
                    .map(Role::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        } else {
            None
        }
    }
}

/// Inputs a gate's denial dialog depends on. The dialog is re-derived only
/// when these change, so a dismissed dialog stays closed until then.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Inputs {
    is_loading: bool,
    effective_role: Option<Role>,
    requirement: Requirement,
    show_modal: bool,
}

impl Inputs {
    pub(crate) fn new(access: &RoleAccess, requirement: &Requirement, show_modal: bool) -> Self {
        Self {
            is_loading: access.is_loading,
            effective_role: access.effective_role.clone(),
            requirement: requirement.clone(),
            show_modal,
        }
    }
}
