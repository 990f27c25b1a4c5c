//! Cooperative cancellation for synthesis passes.
//!
//! The engine checks the token between independent member-emission steps,
//! never mid-statement, so a cancelled pass can never yield partially
//! emitted, unparseable text that could be mistaken for a completed
//! artifact.

use crate::error::{EngineError, EngineResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation token shared between the host and a pass.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Error out if cancellation has been requested.
    pub fn ensure_not_cancelled(&self) -> EngineResult<()> {
        if self.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }
}
