//! Cooperative cancellation for long-running diagnostics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that lets a caller abandon an in-flight computation.
///
/// Clones share the underlying flag, so one clone can be handed to the
/// computation and another kept by the caller. Workers poll the token
/// between observations; a cancelled run returns
/// [`DiagnosticsError::Cancelled`](crate::core::DiagnosticsError::Cancelled)
/// instead of a partial result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
