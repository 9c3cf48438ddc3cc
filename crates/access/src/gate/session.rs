use sellerdesk_shared::{Navigator, Route, Session, navigation::screens};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionDecision {
    Loading,
    Redirect,
    Valid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionView<T> {
    Spinner,
    Nothing,
    Children(T),
}

/// Checks only that somebody is signed in. Permissions are the business of
/// [`ScreenGate`](super::ScreenGate) and [`FeatureGate`](super::FeatureGate).
#[derive(Clone, Debug, Default)]
pub struct SessionGate {
    redirected: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(session: &Session) -> SessionDecision {
        if session.is_loading {
            SessionDecision::Loading
        } else if session.has_valid_token() {
            SessionDecision::Valid
        } else {
            SessionDecision::Redirect
        }
    }

    /// Resets the stack to the login screen once per loss of session.
    pub fn render<T>(
        &mut self,
        session: &Session,
        navigator: &dyn Navigator,
        children: impl FnOnce() -> T,
    ) -> SessionView<T> {
        match Self::decide(session) {
            SessionDecision::Loading => SessionView::Spinner,
            SessionDecision::Redirect => {
                if !self.redirected {
                    warn!("No valid session, resetting navigation to login");
                    navigator.reset(vec![Route::new(screens::AUTH)]);
                    self.redirected = true;
                }
                SessionView::Nothing
            }
            SessionDecision::Valid => {
                self.redirected = false;
                SessionView::Children(children())
            }
        }
    }
}
