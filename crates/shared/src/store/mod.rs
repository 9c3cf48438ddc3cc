use serde::{Deserialize, Serialize};

use crate::Role;

/// One entry of a store's membership list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreUser {
    #[serde(default, deserialize_with = "crate::de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::de::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::de::opt_string")]
    pub role: Option<String>,
}

impl StoreUser {
    pub fn role(&self) -> Option<Role> {
        Role::parse_optional(self.role.as_deref())
    }
}
