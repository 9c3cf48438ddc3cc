#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sellerdesk_shared::subscription::{
    PlanState, RenewalReceipt, RenewalRequest, SubscriptionInfo,
};
use sellerdesk_shared::wallet::WalletBalance;
use sellerdesk_shared::{ApiError, Navigator, Notifier, Route};
use sellerdesk_subscription::SubscriptionApi;
use time::Date;

#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Navigate(String, serde_json::Value),
    GoBack,
    Reset(Vec<Route>),
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: &str, params: serde_json::Value) {
        self.events
            .lock()
            .unwrap()
            .push(NavEvent::Navigate(screen.to_owned(), params));
    }

    fn go_back(&self) {
        self.events.lock().unwrap().push(NavEvent::GoBack);
    }

    fn reset(&self, routes: Vec<Route>) {
        self.events.lock().unwrap().push(NavEvent::Reset(routes));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_owned(), message.to_owned()));
    }
}

/// Serves queued plan responses; the last one repeats.
#[derive(Default)]
pub struct FakeApi {
    pub plans: Mutex<VecDeque<sellerdesk_shared::Result<PlanState>>>,
    pub balance: Mutex<Option<WalletBalance>>,
    pub renew_result: Mutex<Option<ApiError>>,
    pub renewals: Mutex<Vec<RenewalRequest>>,
    pub renew_delay: Mutex<Option<Duration>>,
    pub balance_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_plans(plans: Vec<sellerdesk_shared::Result<PlanState>>) -> Self {
        Self {
            plans: Mutex::new(plans.into()),
            ..Default::default()
        }
    }

    pub fn balance(self, shopping_balance: f64) -> Self {
        *self.balance.lock().unwrap() = Some(WalletBalance {
            shopping_balance,
            ..Default::default()
        });
        self
    }

    pub fn failing_renewal(self, error: ApiError) -> Self {
        *self.renew_result.lock().unwrap() = Some(error);
        self
    }

    pub fn slow_renewal(self, delay: Duration) -> Self {
        *self.renew_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn renewals(&self) -> Vec<RenewalRequest> {
        self.renewals.lock().unwrap().clone()
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SubscriptionApi for FakeApi {
    async fn plan(&self, _token: &str) -> sellerdesk_shared::Result<PlanState> {
        let mut plans = self.plans.lock().unwrap();
        if plans.len() > 1 {
            plans.pop_front().unwrap()
        } else {
            plans
                .front()
                .cloned()
                .unwrap_or(Err(ApiError::Transport("no plan queued".to_owned())))
        }
    }

    async fn balance(&self, _token: &str) -> sellerdesk_shared::Result<WalletBalance> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::Http {
                status: 503,
                message: None,
            })
    }

    async fn renew(
        &self,
        _token: &str,
        request: &RenewalRequest,
    ) -> sellerdesk_shared::Result<RenewalReceipt> {
        self.renewals.lock().unwrap().push(request.clone());
        let delay = *self.renew_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.renew_result.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(RenewalReceipt::default()),
        }
    }
}

pub fn renewable_plan(price: f64, end_date: Date) -> PlanState {
    PlanState {
        plan_name: Some("Growth".to_owned()),
        is_free_trial_claimed: true,
        subscription: Some(SubscriptionInfo {
            status: Some("expired".to_owned()),
            plan_id: Some("4".to_owned()),
            plan_price: Some(price),
            end_date: Some(end_date),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn healthy_plan(end_date: Date) -> PlanState {
    PlanState {
        plan_name: Some("Growth".to_owned()),
        is_free_trial_claimed: true,
        subscription: Some(SubscriptionInfo {
            status: Some("active".to_owned()),
            plan_id: Some("4".to_owned()),
            plan_price: Some(5000.0),
            end_date: Some(end_date),
            ..Default::default()
        }),
        ..Default::default()
    }
}
