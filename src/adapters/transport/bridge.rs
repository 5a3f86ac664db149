//! Runtime bridge - runs async work to completion from a blocking caller.
//!
//! Every call gets a private current-thread runtime on a dedicated scoped
//! thread. The runtime never outlives the call: it is shut down on success
//! and dropped during unwinding if the future panics. A caller sitting
//! inside another runtime is therefore never asked to nest schedulers.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Grace period for blocking tasks (e.g. DNS lookups) at teardown.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("failed to build runtime: {0}")]
    Build(String),

    #[error("bridged task panicked")]
    Panicked,
}

#[derive(Debug, Default)]
struct BridgeStats {
    opened: AtomicUsize,
    live: AtomicUsize,
}

/// Decrements the live count however the bridged thread exits.
struct LiveGuard<'a>(&'a BridgeStats);

impl Drop for LiveGuard<'_> {
    fn drop(&mut self) {
        self.0.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owner of the one-runtime-per-call policy.
///
/// Cloning shares the counters, which exist so tests can observe that no
/// runtime survives its call.
#[derive(Debug, Clone, Default)]
pub struct RuntimeBridge {
    stats: Arc<BridgeStats>,
}

impl RuntimeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the future produced by `make_future` on a fresh runtime and
    /// returns its output.
    pub fn run<F, Fut, T>(&self, make_future: F) -> Result<T, BridgeError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T>,
        T: Send,
    {
        let stats = &*self.stats;
        std::thread::scope(|scope| {
            let worker = scope.spawn(move || {
                stats.opened.fetch_add(1, Ordering::SeqCst);
                stats.live.fetch_add(1, Ordering::SeqCst);
                let _live = LiveGuard(stats);

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| BridgeError::Build(e.to_string()))?;
                let output = runtime.block_on(make_future());
                runtime.shutdown_timeout(SHUTDOWN_GRACE);
                Ok(output)
            });
            worker.join().map_err(|_| BridgeError::Panicked)?
        })
    }

    /// Runtimes created so far.
    pub fn contexts_opened(&self) -> usize {
        self.stats.opened.load(Ordering::SeqCst)
    }

    /// Runtimes currently alive. Zero whenever no call is in flight.
    pub fn contexts_live(&self) -> usize {
        self.stats.live.load(Ordering::SeqCst)
    }
}
