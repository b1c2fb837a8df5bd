//! Single in-flight operation guard.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Admits at most one operation at a time.
///
/// Admission hands out an [`OperationPermit`]; the guard is free again as
/// soon as the permit is dropped, whichever way the operation ends.
#[derive(Debug, Clone)]
pub struct OperationGuard {
    slot: Arc<Semaphore>,
}

impl OperationGuard {
    /// Creates a free guard.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Tries to start an operation. `None` means one is already running.
    pub fn try_enter(&self) -> Option<OperationPermit> {
        let permit = Arc::clone(&self.slot).try_acquire_owned().ok()?;
        trace!("Operation admitted");
        Some(OperationPermit { _permit: permit })
    }

    /// Waits until the running operation finishes, then starts a new one.
    ///
    /// Returns `None` if `cancel` fires first.
    pub async fn enter(&self, cancel: &CancellationToken) -> Option<OperationPermit> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            permit = Arc::clone(&self.slot).acquire_owned() => {
                trace!("Operation admitted after wait");
                permit.ok().map(|permit| OperationPermit { _permit: permit })
            }
        }
    }

    /// Whether an operation is running.
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for OperationGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof of admission; releases the guard on drop.
#[must_use = "the guard is released as soon as the permit is dropped"]
#[derive(Debug)]
pub struct OperationPermit {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_second_entry_rejected() {
        let guard = OperationGuard::new();

        let permit = guard.try_enter();
        assert!(permit.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_enter().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_enter().is_some());
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(guard: &OperationGuard) -> Result<(), &'static str> {
            let _permit = guard.try_enter().ok_or("busy")?;
            Err("boom")
        }

        let guard = OperationGuard::new();
        assert_eq!(fails(&guard), Err("boom"));
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_released_on_panic() {
        let guard = OperationGuard::new();
        let cloned = guard.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _permit = cloned.try_enter();
            panic!("operation failed");
        }));

        assert!(result.is_err());
        assert!(!guard.is_busy());
    }

    #[tokio::test]
    async fn test_released_when_future_dropped() {
        let guard = OperationGuard::new();
        let cloned = guard.clone();
        let (entered_tx, entered_rx) = tokio::sync::oneshot::channel();

        let task = tokio::spawn(async move {
            let _permit = cloned.try_enter();
            let _ = entered_tx.send(());
            std::future::pending::<()>().await;
        });
        entered_rx.await.unwrap();
        assert!(guard.is_busy());

        task.abort();
        let _ = task.await;
        assert!(!guard.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_waits_for_release() {
        let guard = OperationGuard::new();
        let permit = guard.try_enter().unwrap();

        let waiter = tokio::spawn({
            let guard = guard.clone();
            async move { guard.enter(&CancellationToken::new()).await.is_some() }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!waiter.is_finished());

        drop(permit);
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_enter_gives_up_on_cancel() {
        let guard = OperationGuard::new();
        let _permit = guard.try_enter().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(guard.enter(&cancel).await.is_none());
        assert!(guard.is_busy());
    }
}
