//! Tracer Lambda: concurrent calls, one persisted record, classified response

pub mod fetch;
pub mod handler;
pub mod record;
pub mod response;
pub mod trace;

// Re-export the service for convenience
pub use handler::TracerService;
