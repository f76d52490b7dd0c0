pub mod handlers;
pub mod upload;

pub use handlers::{download, health_check, process};
