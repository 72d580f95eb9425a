use std::sync::atomic::{AtomicBool, Ordering};

/// Process-scoped cold start flag: the first invocation after construction
/// is the cold one.
#[derive(Debug)]
pub struct ColdStart(AtomicBool);

impl ColdStart {
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    /// Returns whether this is the cold invocation and clears the flag.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

impl Default for ColdStart {
    fn default() -> Self {
        Self::new()
    }
}
