//! Logger Lambda: SQS batch handler that demonstrates leveled logging

pub mod handler;

// Re-export the service for convenience
pub use handler::{FAILURE_MARKER, LoggerService, SUCCESS_MARKER};
