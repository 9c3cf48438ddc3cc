#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};

use sellerdesk_access::StoreUserSource;
use sellerdesk_shared::{
    ApiError, Navigator, Role, Route, Session, SessionUser, store::StoreUser,
};

#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Navigate(String, serde_json::Value),
    GoBack,
    Reset(Vec<Route>),
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub events: Mutex<Vec<NavEvent>>,
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

pub struct FakeStoreUsers {
    pub users: Vec<StoreUser>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeStoreUsers {
    pub fn new(users: Vec<StoreUser>) -> Self {
        Self {
            users,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(users: Vec<StoreUser>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(users)
        }
    }

    pub fn failing() -> Self {
        Self {
            users: vec![],
            fail: true,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StoreUserSource for FakeStoreUsers {
    async fn store_users(&self, _token: &str) -> sellerdesk_shared::Result<Vec<StoreUser>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ApiError::Http {
                status: 500,
                message: Some("boom".to_owned()),
            });
        }
        Ok(self.users.clone())
    }
}

pub fn member(id: &str, email: &str, role: &str) -> StoreUser {
    StoreUser {
        id: id.to_owned(),
        email: Some(email.to_owned()),
        role: Some(role.to_owned()),
    }
}

pub fn session(token: Option<&str>, user_id: &str, coarse: Option<Role>) -> Session {
    Session {
        token: token.map(str::to_owned),
        user: Some(SessionUser {
            id: user_id.to_owned(),
            email: Some(format!("{user_id}@shop.test")),
            role: coarse,
        }),
        is_loading: false,
    }
}
