//! Screen-scoped task ownership.
//!
//! A screen spawns its requests into one scope; when the screen goes away the
//! scope goes with it and every in-flight task is aborted, so nothing updates
//! torn-down state.

use tokio::task::JoinHandle;
use tracing::debug;

/// Owns the tasks spawned for one screen's lifetime.
#[derive(Debug, Default)]
pub struct RequestScope {
    tasks: Vec<JoinHandle<()>>,
}

impl RequestScope {
    /// Empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task owned by this scope.
    ///
    /// Finished handles are pruned on each call so long-lived scopes do not
    /// accumulate them.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(tokio::spawn(future));
    }

    /// Number of tasks still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    /// Abort every in-flight task.
    pub fn cancel(&mut self) {
        let aborted = self.tasks.len();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if aborted > 0 {
            debug!(aborted, "request scope cancelled");
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
