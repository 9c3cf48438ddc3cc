use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sellerdesk_shared::navigation::screens;
use sellerdesk_shared::subscription::{PaymentMethod, PlanState, RenewalReceipt, RenewalRequest};
use sellerdesk_shared::wallet::WalletBalance;
use sellerdesk_shared::{Navigator, Notifier};
use serde_json::json;
use time::Date;
use tracing::{info, instrument, warn};
use ulid::Ulid;

use crate::{RenewalError, RenewalModal, RenewalOutcome, evaluate};

#[async_trait::async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn plan(&self, token: &str) -> sellerdesk_shared::Result<PlanState>;

    async fn balance(&self, token: &str) -> sellerdesk_shared::Result<WalletBalance>;

    async fn renew(
        &self,
        token: &str,
        request: &RenewalRequest,
    ) -> sellerdesk_shared::Result<RenewalReceipt>;
}

#[async_trait::async_trait]
impl<T: SubscriptionApi + ?Sized> SubscriptionApi for Arc<T> {
    async fn plan(&self, token: &str) -> sellerdesk_shared::Result<PlanState> {
        (**self).plan(token).await
    }

    async fn balance(&self, token: &str) -> sellerdesk_shared::Result<WalletBalance> {
        (**self).balance(token).await
    }

    async fn renew(
        &self,
        token: &str,
        request: &RenewalRequest,
    ) -> sellerdesk_shared::Result<RenewalReceipt> {
        (**self).renew(token, request).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Confirmed {
    /// Wallet debit accepted by the backend.
    Renewed,
    /// Handed off to the payment webview under this order reference.
    Redirected { order_id: String },
}

pub fn new_order_id() -> String {
    format!("SUB-{}", Ulid::new())
}

#[derive(Default)]
struct State {
    outcome: Option<RenewalOutcome>,
    plan: Option<PlanState>,
    modal: RenewalModal,
}

/// Drives the renewal flow of one screen visit: plan fetch, evaluation, the
/// renewal prompt and payment dispatch.
pub struct RenewalController<A> {
    api: A,
    token: String,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State>,
    submitting: AtomicBool,
}

struct Submitting<'a>(&'a AtomicBool);

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: SubscriptionApi> RenewalController<A> {
    pub fn new(
        api: A,
        token: impl Into<String>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            token: token.into(),
            navigator,
            notifier,
            state: Mutex::new(State::default()),
            submitting: AtomicBool::new(false),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn outcome(&self) -> RenewalOutcome {
        self.with_state(|s| s.outcome.unwrap_or(RenewalOutcome::Evaluating))
    }

    pub fn plan(&self) -> Option<PlanState> {
        self.with_state(|s| s.plan.clone())
    }

    pub fn modal(&self) -> RenewalModal {
        self.with_state(|s| s.modal.clone())
    }

    /// Fetches the plan and acts on it. A failed fetch keeps the previous
    /// outcome (`Evaluating` on first load).
    #[instrument(skip(self))]
    pub async fn load(&self, today: Date) -> RenewalOutcome {
        let plan = match self.api.plan(&self.token).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Failed to fetch subscription plan");
                return self.outcome();
            }
        };

        let outcome = evaluate(Some(&plan), today);
        info!(
            outcome = %outcome,
            plan = ?plan.plan_name,
            days_until_expiry = ?plan.days_until_expiry,
            "Subscription evaluated"
        );

        self.with_state(|s| {
            s.outcome = Some(outcome);
            if outcome == RenewalOutcome::ShowRenewalModal {
                s.modal = RenewalModal::open(&plan);
            }
            s.plan = Some(plan);
        });

        match outcome {
            RenewalOutcome::RouteToTrial => {
                self.navigator.navigate(screens::SUBSCRIPTION, json!({}));
            }
            RenewalOutcome::ShowRenewalModal => {
                self.refresh_balance().await;
            }
            _ => {}
        }

        outcome
    }

    /// Fetches the wallet balance for the open prompt.
    pub async fn refresh_balance(&self) {
        if !self.with_state(|s| s.modal.visible) {
            return;
        }

        match self.api.balance(&self.token).await {
            Ok(balance) => self.with_state(|s| {
                s.modal.wallet_amount = Some(balance.shopping_balance);
            }),
            Err(e) => warn!(error = %e, "Failed to fetch wallet balance"),
        }
    }

    pub fn select(&self, method: PaymentMethod) {
        self.with_state(|s| s.modal.selected = method);
    }

    pub fn dismiss(&self) {
        self.with_state(|s| s.modal.close());
    }

    /// Leaves the prompt for the wallet top-up flow.
    pub fn top_up(&self) {
        let shortfall = self.with_state(|s| {
            let shortfall = s.modal.shortfall();
            s.modal.close();
            shortfall
        });
        self.navigator
            .navigate(screens::TOP_UP, json!({ "amount": shortfall }));
    }

    /// Pays with the selected method. Failures are alerted here and leave the
    /// prompt open so the user can retry or switch method. Nothing is
    /// dispatched, by either method, while a wallet payment is pending.
    #[instrument(skip(self))]
    pub async fn confirm(&self, today: Date) -> Result<Confirmed, RenewalError> {
        let modal = self.modal();
        if self.submitting.load(Ordering::Acquire) || modal.submitting {
            return Err(RenewalError::InFlight);
        }
        if !modal.visible {
            return Err(RenewalError::NotOpen);
        }
        let plan_id = modal.plan_id.clone().ok_or(RenewalError::MissingPlan)?;

        match modal.selected {
            PaymentMethod::External => Ok(self.redirect(&modal, plan_id)),
            PaymentMethod::Wallet => {
                if !modal.has_enough_balance() {
                    return Err(RenewalError::InsufficientBalance {
                        shortfall: modal.shortfall(),
                    });
                }
                self.pay_with_wallet(plan_id, today).await
            }
        }
    }

    fn redirect(&self, modal: &RenewalModal, plan_id: String) -> Confirmed {
        let order_id = new_order_id();
        info!(order_id = %order_id, plan_id = %plan_id, "Redirecting to payment webview");

        self.navigator.navigate(
            screens::PAYMENT_WEBVIEW,
            json!({
                "amount": modal.plan_price,
                "order_id": order_id,
                "isSubscription": true,
                "plan_id": plan_id,
            }),
        );
        self.dismiss();

        Confirmed::Redirected { order_id }
    }

    async fn pay_with_wallet(&self, plan_id: String, today: Date) -> Result<Confirmed, RenewalError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RenewalError::InFlight);
        }
        let _guard = Submitting(&self.submitting);
        self.with_state(|s| s.modal.submitting = true);

        let request = RenewalRequest::wallet(plan_id);
        match self.api.renew(&self.token, &request).await {
            Ok(receipt) => {
                info!(plan_id = %request.plan_id, "Subscription renewed from wallet");
                self.with_state(|s| {
                    s.modal.close();
                    s.modal.wallet_amount = None;
                });
                self.notifier.alert(
                    "Success",
                    receipt
                        .message
                        .as_deref()
                        .unwrap_or("Subscription renewed successfully."),
                );
                self.load(today).await;
                Ok(Confirmed::Renewed)
            }
            Err(e) => {
                let error = RenewalError::from(e);
                warn!(error = %error, "Subscription renewal failed");
                self.with_state(|s| s.modal.submitting = false);
                self.notifier.alert("Renewal Failed", &error.user_message());
                Err(error)
            }
        }
    }
}
