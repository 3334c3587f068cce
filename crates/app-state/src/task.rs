//! Cancellable scheduled tasks
//!
//! A [`ScheduledTask`] runs a callback once after a delay unless it is
//! cancelled first. Screens hold these for their timers so that tearing the
//! screen down also stops anything it scheduled.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Handle for a one-shot delayed callback
///
/// When dropped, the task is cancelled and the callback will not run. The
/// timer and [`cancel`](ScheduledTask::cancel) both claim a shared state word,
/// so exactly one of them wins.
pub struct ScheduledTask {
    stop_tx: Option<oneshot::Sender<()>>,
    state: Arc<AtomicU8>,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `callback` once after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let state = Arc::new(AtomicU8::new(PENDING));
        let claim = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = &mut stop_rx => {
                    tracing::debug!("Scheduled task cancelled before firing");
                }
                _ = tokio::time::sleep(delay) => {
                    if claim
                        .compare_exchange(PENDING, FIRED, Ordering::SeqCst, Ordering::SeqCst)
                        .is_ok()
                    {
                        callback();
                    }
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            state,
            handle,
        }
    }

    /// Cancel the task; the callback will not run if it has not started
    pub fn cancel(&mut self) {
        let _ = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst);
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Whether the task was cancelled before it could fire
    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::SeqCst) == CANCELLED
    }

    /// Whether the timer won and the callback was started
    pub fn has_fired(&self) -> bool {
        self.state.load(Ordering::SeqCst) == FIRED
    }

    /// Whether the task has either fired or stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("fired", &self.has_fired())
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}
