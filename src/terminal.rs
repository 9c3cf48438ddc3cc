//! Terminal stand-ins for the navigation stack and alert surface.

use std::sync::Mutex;

use sellerdesk_shared::{Navigator, Notifier, Route};
use serde_json::Value;
use tracing::info;

/// Prints navigation requests and keeps the current stack.
#[derive(Default)]
pub struct TerminalNavigator {
    stack: Mutex<Vec<Route>>,
}

impl TerminalNavigator {
    pub fn stack(&self) -> Vec<Route> {
        match self.stack.lock() {
            Ok(stack) => stack.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with_stack(&self, f: impl FnOnce(&mut Vec<Route>)) {
        match self.stack.lock() {
            Ok(mut stack) => f(&mut stack),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, screen: &str, params: Value) {
        info!(screen, %params, "navigate");
        println!("-> {screen} {params}");
        self.with_stack(|stack| stack.push(Route::with_params(screen, params)));
    }

    fn go_back(&self) {
        info!("go_back");
        println!("<- back");
        self.with_stack(|stack| {
            stack.pop();
        });
    }

    fn reset(&self, routes: Vec<Route>) {
        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        info!(routes = ?names, "reset");
        println!("=> {}", names.join(" / "));
        self.with_stack(|stack| *stack = routes);
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, title: &str, message: &str) {
        info!(title, message, "alert");
        println!("[{title}] {message}");
    }
}
