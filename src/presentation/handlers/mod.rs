mod health;
mod process;

pub use health::health_handler;
pub use process::{method_not_allowed_handler, process_handler};
