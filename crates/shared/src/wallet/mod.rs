use serde::{Deserialize, Serialize};

/// Balances of the seller's wallet. Only the shopping balance funds renewals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    #[serde(default, deserialize_with = "crate::de::number_or_zero")]
    pub shopping_balance: f64,
    #[serde(default, deserialize_with = "crate::de::number_or_zero")]
    pub escrow_balance: f64,
    #[serde(default, deserialize_with = "crate::de::number_or_zero")]
    pub reward_balance: f64,
    #[serde(default, deserialize_with = "crate::de::number_or_zero")]
    pub loyality_points: f64,
}
