use sellerdesk_shared::subscription::{PaymentMethod, PlanState};
use serde::Serialize;

pub fn has_enough_balance(wallet_amount: f64, plan_price: f64) -> bool {
    wallet_amount >= plan_price
}

/// State behind the renewal prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenewalModal {
    pub visible: bool,
    pub plan_name: Option<String>,
    pub plan_id: Option<String>,
    pub plan_price: f64,
    /// Shopping balance; unknown until the balance request returns.
    pub wallet_amount: Option<f64>,
    pub selected: PaymentMethod,
    pub submitting: bool,
}

impl RenewalModal {
    pub fn open(plan: &PlanState) -> Self {
        Self {
            visible: true,
            plan_name: plan.plan_name.clone(),
            plan_id: plan.plan_id().map(str::to_owned),
            plan_price: plan.plan_price(),
            ..Default::default()
        }
    }

    pub fn has_enough_balance(&self) -> bool {
        has_enough_balance(self.wallet_amount.unwrap_or_default(), self.plan_price)
    }

    pub fn wallet_blocked(&self) -> bool {
        self.selected == PaymentMethod::Wallet && !self.has_enough_balance()
    }

    pub fn confirm_disabled(&self) -> bool {
        self.submitting || self.wallet_blocked()
    }

    pub fn show_top_up(&self) -> bool {
        self.wallet_blocked()
    }

    pub fn shortfall(&self) -> f64 {
        (self.plan_price - self.wallet_amount.unwrap_or_default()).max(0.0)
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.submitting = false;
    }
}
