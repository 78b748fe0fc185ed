use crate::ports::outbound::TaskLauncher;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Spawns units of work onto the tokio runtime.
///
/// The unbounded form matches fire-and-forget dispatch: one task per
/// accepted unit, no queueing. The bounded form caps how many units
/// execute at once; work beyond the cap waits inside its own task for a
/// permit. Claims are taken before launch either way, so per-key
/// exclusivity is unaffected by the cap.
pub struct TokioTaskLauncher {
    permits: Option<Arc<Semaphore>>,
}

impl TokioTaskLauncher {
    pub fn unbounded() -> Self {
        Self { permits: None }
    }

    pub fn bounded(max_concurrent: usize) -> Self {
        Self {
            permits: Some(Arc::new(Semaphore::new(max_concurrent))),
        }
    }
}

impl Default for TokioTaskLauncher {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl TaskLauncher for TokioTaskLauncher {
    fn launch(&self, work: BoxFuture<'static, ()>) {
        match &self.permits {
            None => {
                tokio::spawn(work);
            }
            Some(permits) => {
                let permits = Arc::clone(permits);
                tokio::spawn(async move {
                    // The semaphore is never closed while the launcher lives.
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return;
                    };
                    work.await;
                });
            }
        }
    }
}
