use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

/// Cancellation handle threaded through one evaluation.
///
/// Clones share the same flag, so cancelling any clone cancels all of them.
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is only cancelled explicitly.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and all its clones.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` if cancelled or past the deadline.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails with [`crate::Error::Cancelled`] once the context is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the context was cancelled.
    pub fn check(&self) -> crate::Result<()> {
        if self.is_cancelled() {
            log::warn!("evaluation cancelled");
            Err(crate::Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
