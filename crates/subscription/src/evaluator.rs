//! Decides what the home screen does with a freshly fetched plan.

use sellerdesk_shared::subscription::PlanState;
use serde::Serialize;
use strum::{AsRefStr, Display};
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewalOutcome {
    /// No plan data yet.
    Evaluating,
    RouteToTrial,
    ShowRenewalModal,
    Silent,
    /// Nothing to do and the subscription reports itself active.
    SilentActive,
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Active means: status `active`, or a plan id or start date on a plan that
/// is not flagged expired.
pub fn has_active_subscription(plan: &PlanState) -> bool {
    let Some(subscription) = &plan.subscription else {
        return false;
    };

    subscription.status.as_deref() == Some("active")
        || (subscription.plan_id.is_some() && !plan.is_expired)
        || (subscription.start_date.is_some() && !plan.is_expired)
}

/// Flags first, then the end date at day granularity.
pub fn should_show_renewal(plan: &PlanState, today: Date) -> bool {
    if plan.needs_renewal || plan.is_expired {
        return true;
    }

    plan.subscription
        .as_ref()
        .and_then(|s| s.end_date)
        .is_some_and(|end| end <= today)
}

pub fn evaluate(plan: Option<&PlanState>, today: Date) -> RenewalOutcome {
    let Some(plan) = plan else {
        return RenewalOutcome::Evaluating;
    };

    if !plan.is_free_trial_claimed && !has_active_subscription(plan) {
        return RenewalOutcome::RouteToTrial;
    }

    if should_show_renewal(plan, today) && plan.plan_id().is_some() {
        return RenewalOutcome::ShowRenewalModal;
    }

    if plan.status() == Some("active") {
        RenewalOutcome::SilentActive
    } else {
        RenewalOutcome::Silent
    }
}
