//! Supersession of in-flight price calculations.
//!
//! Only the most recently started calculation may update the view. Starting
//! a new one cancels its predecessor, and a result is committed only after
//! checking that its token is still the active one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle of one calculation request.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    cancel: CancellationToken,
}

impl RequestToken {
    /// Monotonic id of the request within its controller.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancellation signal to pass down to the backend call.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the request has been cancelled or superseded.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct Slot {
    next_generation: u64,
    active: Option<RequestToken>,
}

/// Tracks the active calculation request.
#[derive(Debug)]
pub struct RequestSupersession {
    parent: CancellationToken,
    slot: Mutex<Slot>,
}

impl RequestSupersession {
    /// Creates a controller whose tokens are children of `parent`.
    ///
    /// Cancelling the parent cancels every token handed out.
    pub fn new(parent: CancellationToken) -> Self {
        Self {
            parent,
            slot: Mutex::new(Slot::default()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the active request, if any, and installs a fresh one.
    pub fn start_new(&self) -> RequestToken {
        let mut slot = self.slot();

        if let Some(previous) = slot.active.take() {
            previous.cancel.cancel();
            debug!(generation = previous.generation, "Superseded request");
        }

        slot.next_generation += 1;
        let token = RequestToken {
            generation: slot.next_generation,
            cancel: self.parent.child_token(),
        };
        slot.active = Some(token.clone());
        token
    }

    /// Whether `token` is still allowed to update the view.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        !token.is_cancelled()
            && self
                .slot()
                .active
                .as_ref()
                .is_some_and(|active| active.generation == token.generation)
    }

    /// Removes the active token if it is `token`.
    pub fn clear(&self, token: &RequestToken) {
        let mut slot = self.slot();
        if slot
            .active
            .as_ref()
            .is_some_and(|active| active.generation == token.generation)
        {
            slot.active = None;
        }
    }

    /// Whether a request is active.
    pub fn has_active(&self) -> bool {
        self.slot().active.is_some()
    }

    /// Cancels and removes the active request.
    pub fn cancel_all(&self) {
        if let Some(active) = self.slot().active.take() {
            active.cancel.cancel();
            debug!(generation = active.generation, "Cancelled request");
        }
    }
}

impl Default for RequestSupersession {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_cancels_previous() {
        let controller = RequestSupersession::default();

        let first = controller.start_new();
        assert!(controller.is_current(&first));

        let second = controller.start_new();
        assert!(first.is_cancelled());
        assert!(!controller.is_current(&first));
        assert!(controller.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_clear_only_matching() {
        let controller = RequestSupersession::default();

        let first = controller.start_new();
        let second = controller.start_new();

        controller.clear(&first);
        assert!(controller.has_active());
        assert!(controller.is_current(&second));

        controller.clear(&second);
        assert!(!controller.has_active());
        assert!(!controller.is_current(&second));
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_cancel_all() {
        let controller = RequestSupersession::default();
        let token = controller.start_new();

        controller.cancel_all();

        assert!(token.is_cancelled());
        assert!(!controller.has_active());
    }

    #[test]
    fn test_parent_cancellation_propagates() {
        let parent = CancellationToken::new();
        let controller = RequestSupersession::new(parent.clone());
        let token = controller.start_new();

        parent.cancel();

        assert!(token.is_cancelled());
        assert!(!controller.is_current(&token));
    }
}
