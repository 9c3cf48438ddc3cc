//! Collaborators the decision code drives but does not own: the navigation
//! stack and the blocking alert surface.

use serde::Serialize;
use serde_json::Value;

pub mod screens {
    pub const AUTH: &str = "Auth";
    pub const SUBSCRIPTION: &str = "Subscription";
    pub const PAYMENT_WEBVIEW: &str = "PaymentWebView";
    pub const TOP_UP: &str = "TopUp";
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    pub name: String,
    pub params: Value,
}

impl Route {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Value::Null,
        }
    }

    pub fn with_params(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: &str, params: Value);

    fn go_back(&self);

    /// Replaces the whole stack; screens below are no longer reachable by
    /// going back.
    fn reset(&self, routes: Vec<Route>);
}

pub trait Notifier: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}
