//! Background warm-up pings.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use voiceprice_fetch::PricingApi;

/// Default interval between pings.
pub const DEFAULT_KEEP_WARM_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodic fire-and-forget calculation that keeps the backend awake.
pub struct KeepWarm;

impl KeepWarm {
    /// Pings once right away, then every `interval` until stopped.
    ///
    /// The task stops when the handle is stopped or dropped, or when
    /// `shutdown` is cancelled. Must be called within a tokio runtime.
    pub fn spawn(api: PricingApi, interval: Duration, shutdown: &CancellationToken) -> KeepWarmHandle {
        let cancel = shutdown.child_token();
        let pings = Arc::new(AtomicU64::new(0));
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn({
            let cancel = cancel.clone();
            let pings = Arc::clone(&pings);
            async move {
                info!(interval_secs = interval.as_secs(), "Keep-warm started");
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => break,
                        _ = ticker.tick() => {}
                    }

                    let warm = api.warm_up(&cancel).await;
                    let count = pings.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(warm, count, "Keep-warm ping");
                }

                debug!("Keep-warm stopped");
            }
        });

        KeepWarmHandle {
            cancel,
            pings,
            task: Some(task),
        }
    }
}

/// Handle of a running keep-warm task.
#[derive(Debug)]
pub struct KeepWarmHandle {
    cancel: CancellationToken,
    pings: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl KeepWarmHandle {
    /// Stops the task. An in-flight ping is abandoned.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the task is still scheduled.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Number of pings sent so far.
    pub fn pings(&self) -> u64 {
        self.pings.load(Ordering::Relaxed)
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for KeepWarmHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
