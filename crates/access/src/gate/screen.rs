use sellerdesk_shared::Navigator;
use tracing::info;

use super::{Decision, Inputs, Requirement};
use crate::{AccessDeniedModal, RoleAccess};

#[derive(Clone, Debug, PartialEq)]
pub enum ScreenView<T> {
    Nothing,
    Denied(AccessDeniedModal),
    Screen(T),
}

/// Whole-screen variant of the feature gate. Refusal always shows the
/// dialog, and closing it leaves the screen.
#[derive(Clone, Debug, Default)]
pub struct ScreenGate {
    requirement: Requirement,
    modal: AccessDeniedModal,
    last_inputs: Option<Inputs>,
}

impl ScreenGate {
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            ..Default::default()
        }
    }

    pub fn modal(&self) -> &AccessDeniedModal {
        &self.modal
    }

    pub fn decide(&self, access: &RoleAccess) -> Decision {
        self.requirement.decide(access)
    }

    pub fn render<T>(&mut self, access: &RoleAccess, screen: impl FnOnce() -> T) -> ScreenView<T> {
        let decision = self.decide(access);
        let inputs = Inputs::new(access, &self.requirement, true);

        if self.last_inputs.as_ref() != Some(&inputs) {
            self.modal = match decision {
                Decision::Denied => {
                    info!(
                        required = ?self.requirement.label(),
                        effective_role = ?access.effective_role,
                        "Screen access denied"
                    );
                    AccessDeniedModal::open(self.requirement.label().unwrap_or_default())
                }
                _ => AccessDeniedModal::default(),
            };
            self.last_inputs = Some(inputs);
        }

        match decision {
            Decision::Pending => ScreenView::Nothing,
            Decision::Granted => ScreenView::Screen(screen()),
            Decision::Denied => ScreenView::Denied(self.modal.clone()),
        }
    }

    /// The dialog's only action: close it and pop the screen.
    pub fn close(&mut self, navigator: &dyn Navigator) {
        self.modal.close();
        navigator.go_back();
    }
}
