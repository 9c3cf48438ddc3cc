mod controller;
mod error;
mod evaluator;
mod modal;

pub use controller::*;
pub use error::*;
pub use evaluator::*;
pub use modal::*;
