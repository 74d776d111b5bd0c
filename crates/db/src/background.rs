//! Arena of detached background jobs.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::task::JoinHandle;

/// Tracks spawned jobs so callers can wait for them to settle.
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundTasks {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `job` on the current runtime and records its handle.
    pub fn spawn<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(job);
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of jobs that have not been reaped yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Waits until every recorded job, including ones spawned meanwhile, has finished.
    pub async fn wait_all(&self) {
        loop {
            let batch = {
                let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *handles)
            };
            if batch.is_empty() {
                return;
            }
            for handle in batch {
                if let Err(err) = handle.await {
                    tracing::error!(error = %err, "Background task panicked");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_wait_all_drains_jobs() {
        let tasks = BackgroundTasks::new();
        let done = Arc::new(AtomicUsize::new(0));
        for _ in 0..5 {
            let done = Arc::clone(&done);
            tasks.spawn(async move {
                tokio::task::yield_now().await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        tasks.wait_all().await;
        assert_eq!(done.load(Ordering::SeqCst), 5);
        assert_eq!(tasks.pending(), 0);
    }

    #[tokio::test]
    async fn test_panicking_job_is_contained() {
        let tasks = BackgroundTasks::new();
        tasks.spawn(async { panic!("boom") });
        tasks.wait_all().await;
        assert_eq!(tasks.pending(), 0);
    }

    #[tokio::test]
    async fn test_wait_all_on_empty_arena() {
        BackgroundTasks::new().wait_all().await;
    }
}
