use tracing::debug;

use super::{Decision, Inputs, Requirement};
use crate::{AccessDeniedModal, RoleAccess};

/// Wraps part of a screen. Denied users see the fallback, and the denial
/// dialog when `show_modal` is set.
#[derive(Clone, Debug, Default)]
pub struct FeatureGate {
    requirement: Requirement,
    show_modal: bool,
    modal: AccessDeniedModal,
    last_inputs: Option<Inputs>,
}

impl FeatureGate {
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            ..Default::default()
        }
    }

    pub fn show_modal(mut self, show_modal: bool) -> Self {
        self.show_modal = show_modal;
        self
    }

    pub fn set_requirement(&mut self, requirement: Requirement) {
        self.requirement = requirement;
    }

    pub fn set_show_modal(&mut self, show_modal: bool) {
        self.show_modal = show_modal;
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn modal(&self) -> &AccessDeniedModal {
        &self.modal
    }

    pub fn dismiss_modal(&mut self) {
        self.modal.close();
    }

    /// Re-derives the denial dialog if any input changed since the last call.
    pub fn sync(&mut self, access: &RoleAccess) -> Decision {
        let decision = self.requirement.decide(access);
        let inputs = Inputs::new(access, &self.requirement, self.show_modal);

        if self.last_inputs.as_ref() != Some(&inputs) {
            self.modal = match decision {
                Decision::Denied if self.show_modal => {
                    debug!(
                        required = ?self.requirement.label(),
                        effective_role = ?access.effective_role,
                        "Feature denied"
                    );
                    AccessDeniedModal::open(self.requirement.label().unwrap_or_default())
                }
                _ => AccessDeniedModal::default(),
            };
            self.last_inputs = Some(inputs);
        }

        decision
    }

    /// Returns the children when granted, the fallback when denied and
    /// nothing while access is still loading.
    pub fn render<T>(
        &mut self,
        access: &RoleAccess,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        match self.sync(access) {
            Decision::Pending => None,
            Decision::Granted => Some(children()),
            Decision::Denied => fallback(),
        }
    }
}
