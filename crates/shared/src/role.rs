use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// A role as reported by the backend, either at login (coarse role) or in a
/// store's membership list (store-user role).
///
/// Unknown values are kept verbatim in [`Role::Other`] so a coarse role the
/// client does not know about still flows through role comparisons.
#[derive(EnumString, Display, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum Role {
    Owner,
    Admin,
    StoreManager,
    Inventory,
    Accountant,
    Seller,
    #[strum(default)]
    Other(String),
}

impl Role {
    /// Parses a raw role, mapping an empty or blank value to `None`.
    pub fn parse_optional(value: Option<&str>) -> Option<Role> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Role::from)
    }

    /// Owner and admin are interchangeable for role checks.
    pub fn is_owner_or_admin(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.to_string()
    }
}

/// Named capabilities derived from the effective role.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    CanManageDm,
    CanManageSocials,
    CanManageReviews,
    CanUpdateOrderStatus,
    CanAcceptDeclineOrders,
    CanViewProducts,
    CanUploadProducts,
    CanManageProducts,
    CanUpdateStock,
    CanViewOrders,
    CanViewAnalytics,
    CanManageSubscriptions,
    HasFullAccess,
}

impl Permission {
    /// The role, besides owner and admin, that is granted this capability.
    pub fn extra_role(&self) -> Option<Role> {
        match self {
            Permission::CanManageDm
            | Permission::CanManageSocials
            | Permission::CanManageReviews
            | Permission::CanUpdateOrderStatus
            | Permission::CanAcceptDeclineOrders => Some(Role::StoreManager),
            Permission::CanViewProducts
            | Permission::CanUploadProducts
            | Permission::CanManageProducts
            | Permission::CanUpdateStock => Some(Role::Inventory),
            Permission::CanViewOrders
            | Permission::CanViewAnalytics
            | Permission::CanManageSubscriptions => Some(Role::Accountant),
            Permission::HasFullAccess => None,
        }
    }
}
