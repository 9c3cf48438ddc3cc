//! Effective role and permission resolution.
//!
//! The effective role merges the store-user role (preferred) with the coarse
//! role from login (fallback). Permissions are a pure table over it:
//! owner and admin get everything, every other capability is granted to at
//! most one extra role.

use sellerdesk_shared::{Permission, Role, Session};
use serde::Serialize;
use strum::VariantArray;
use tracing::{debug, instrument};

use crate::query::{StoreRoleQuery, StoreUserSource};

pub fn resolve_effective_role(
    coarse_role: Option<&Role>,
    store_user_role: Option<&Role>,
) -> Option<Role> {
    if let Some(role) = store_user_role {
        return Some(role.clone());
    }

    match coarse_role? {
        Role::Seller | Role::Owner => Some(Role::Owner),
        other => Some(other.clone()),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub can_manage_dm: bool,
    pub can_manage_socials: bool,
    pub can_manage_reviews: bool,
    pub can_update_order_status: bool,
    pub can_accept_decline_orders: bool,
    pub can_view_products: bool,
    pub can_upload_products: bool,
    pub can_manage_products: bool,
    pub can_update_stock: bool,
    pub can_view_orders: bool,
    pub can_view_analytics: bool,
    pub can_manage_subscriptions: bool,
    pub has_full_access: bool,
}

impl PermissionSet {
    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::CanManageDm => self.can_manage_dm,
            Permission::CanManageSocials => self.can_manage_socials,
            Permission::CanManageReviews => self.can_manage_reviews,
            Permission::CanUpdateOrderStatus => self.can_update_order_status,
            Permission::CanAcceptDeclineOrders => self.can_accept_decline_orders,
            Permission::CanViewProducts => self.can_view_products,
            Permission::CanUploadProducts => self.can_upload_products,
            Permission::CanManageProducts => self.can_manage_products,
            Permission::CanUpdateStock => self.can_update_stock,
            Permission::CanViewOrders => self.can_view_orders,
            Permission::CanViewAnalytics => self.can_view_analytics,
            Permission::CanManageSubscriptions => self.can_manage_subscriptions,
            Permission::HasFullAccess => self.has_full_access,
        }
    }

    pub fn granted(&self) -> Vec<Permission> {
        Permission::VARIANTS
            .iter()
            .copied()
            .filter(|p| self.get(*p))
            .collect()
    }
}

fn allows(role: Option<&Role>, permission: Permission) -> bool {
    role.is_some_and(|role| {
        role.is_owner_or_admin() || permission.extra_role().as_ref() == Some(role)
    })
}

pub fn derive_permissions(effective_role: Option<&Role>) -> PermissionSet {
    let role = effective_role;
    PermissionSet {
        can_manage_dm: allows(role, Permission::CanManageDm),
        can_manage_socials: allows(role, Permission::CanManageSocials),
        can_manage_reviews: allows(role, Permission::CanManageReviews),
        can_update_order_status: allows(role, Permission::CanUpdateOrderStatus),
        can_accept_decline_orders: allows(role, Permission::CanAcceptDeclineOrders),
        can_view_products: allows(role, Permission::CanViewProducts),
        can_upload_products: allows(role, Permission::CanUploadProducts),
        can_manage_products: allows(role, Permission::CanManageProducts),
        can_update_stock: allows(role, Permission::CanUpdateStock),
        can_view_orders: allows(role, Permission::CanViewOrders),
        can_view_analytics: allows(role, Permission::CanViewAnalytics),
        can_manage_subscriptions: allows(role, Permission::CanManageSubscriptions),
        has_full_access: allows(role, Permission::HasFullAccess),
    }
}

/// Role and permissions of the current user in the current store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoleAccess {
    pub effective_role: Option<Role>,
    pub permissions: PermissionSet,
    /// True while the session has no user or no token. Not tied to the
    /// store-role request.
    pub is_loading: bool,
}

impl RoleAccess {
    pub fn compute(session: &Session, store_user_role: Option<&Role>) -> Self {
        let effective_role = resolve_effective_role(session.coarse_role(), store_user_role);
        let permissions = derive_permissions(effective_role.as_ref());

        Self {
            effective_role,
            permissions,
            is_loading: session.user.is_none() || session.token.is_none(),
        }
    }

    pub fn has_role(&self, required: &Role) -> bool {
        let Some(role) = &self.effective_role else {
            return false;
        };

        if required.is_owner_or_admin() && role.is_owner_or_admin() {
            return true;
        }

        role == required
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.get(permission)
    }
}

/// Resolves [`RoleAccess`] for a session, fetching the store-user role
/// through the cached query.
pub struct RoleAccessResolver<S> {
    query: StoreRoleQuery<S>,
}

impl<S: StoreUserSource> RoleAccessResolver<S> {
    pub fn new(query: StoreRoleQuery<S>) -> Self {
        Self { query }
    }

    pub fn query(&self) -> &StoreRoleQuery<S> {
        &self.query
    }

    #[instrument(skip_all)]
    pub async fn resolve(&self, session: &Session) -> RoleAccess {
        let store_user_role = self.query.fetch(session).await;
        let access = RoleAccess::compute(session, store_user_role.as_ref());

        debug!(
            coarse_role = ?session.coarse_role(),
            store_user_role = ?store_user_role,
            effective_role = ?access.effective_role,
            is_loading = access.is_loading,
            "Role access resolved"
        );

        access
    }
}
