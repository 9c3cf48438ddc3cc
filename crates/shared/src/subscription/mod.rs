use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

/// Snapshot of the seller's plan, as returned by the plan endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlanState {
    #[serde(default, rename = "plan", deserialize_with = "plan_name")]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "crate::de::flag")]
    pub is_free_trial_claimed: bool,
    #[serde(default, deserialize_with = "crate::de::flag")]
    pub is_expired: bool,
    #[serde(default, deserialize_with = "crate::de::flag")]
    pub needs_renewal: bool,
    #[serde(default, deserialize_with = "crate::de::opt_integer")]
    pub days_until_expiry: Option<i64>,
    #[serde(default)]
    pub subscription: Option<SubscriptionInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SubscriptionInfo {
    #[serde(default, deserialize_with = "crate::de::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::de::opt_id")]
    pub plan_id: Option<String>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub plan_price: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_date")]
    pub start_date: Option<Date>,
    #[serde(default, deserialize_with = "crate::de::opt_date")]
    pub end_date: Option<Date>,
}

impl PlanState {
    pub fn plan_id(&self) -> Option<&str> {
        self.subscription.as_ref()?.plan_id.as_deref()
    }

    pub fn plan_price(&self) -> f64 {
        self.subscription
            .as_ref()
            .and_then(|s| s.plan_price)
            .unwrap_or_default()
    }

    pub fn status(&self) -> Option<&str> {
        self.subscription.as_ref()?.status.as_deref()
    }
}

/// The `plan` field is either the plan's name or a plan object with a `name`.
fn plan_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
        Some(Value::Object(plan)) => plan
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    })
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Wallet,
    External,
}

/// Body of the renewal mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenewalRequest {
    pub plan_id: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl RenewalRequest {
    pub fn wallet(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            payment_method: PaymentMethod::Wallet,
            billing_period: None,
            amount: None,
        }
    }
}

/// Backend acknowledgement of a renewal.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RenewalReceipt {
    #[serde(default, deserialize_with = "crate::de::opt_string")]
    pub message: Option<String>,
}
