mod de;
mod error;
pub mod navigation;
mod role;
pub mod session;
pub mod store;
pub mod subscription;
pub mod wallet;

pub use de::{Envelope, parse_calendar_date};
pub use error::*;
pub use navigation::{Navigator, Notifier, Route};
pub use role::*;
pub use session::{AuthContext, Session, SessionStore, SessionUser};
