pub mod gate;
mod modal;
mod query;
mod resolver;

pub use gate::{Decision, FeatureGate, Requirement, ScreenGate, ScreenView, SessionDecision, SessionGate, SessionView};
pub use modal::AccessDeniedModal;
pub use query::{StoreRoleQuery, StoreUserSource, member_role};
pub use resolver::*;
