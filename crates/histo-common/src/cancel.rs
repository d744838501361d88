//! Cooperative cancellation for long renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{HistoError, HistoResult};

/// Shared flag checked between pipeline stages.
///
/// A caller timeout flips the flag; the pipeline notices at the next
/// checkpoint and stops before doing compositor work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; visible to all clones.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Checkpoint helper: fail with `Cancelled` if the flag is set.
    pub fn checkpoint(&self) -> HistoResult<()> {
        if self.is_cancelled() {
            Err(HistoError::Cancelled)
        } else {
            Ok(())
        }
    }
}
