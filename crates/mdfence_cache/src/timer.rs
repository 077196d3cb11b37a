//! Cancellable repeating background task.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// A repeating timer with explicit start/stop.
///
/// Each tick runs strictly after the previous one returned, so ticks never
/// overlap. Stopping cancels the pending tick; work the tick already
/// dispatched elsewhere is not cancelled.
#[derive(Debug, Default)]
pub struct RepeatingTask {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RepeatingTask {
    /// Creates a stopped task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking every `interval`. A previously running task is stopped
    /// first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&self, interval: Duration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        let mut handle = self.handle.lock();
        if let Some(previous) = handle.take() {
            previous.abort();
        }

        *handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                tick();
            }
        }));
    }

    /// Cancels the pending tick and stops the task.
    pub fn stop(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }

    /// Whether the task is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}
