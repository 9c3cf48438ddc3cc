pub mod access_control;
pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod session_file;
pub mod terminal;

pub use access_control::{AccessCheck, AccessControlService};
pub use api::ApiClient;
pub use config::Config;
pub use error::AppError;
pub use session_file::FileSessionStore;
