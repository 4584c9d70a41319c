//! "Item added" notifications with auto-dismiss.
//!
//! At most one notification is pending. A new one replaces the old one and
//! restarts the timer; [`Notifier::close`] dismisses early and may be called
//! any number of times.
//!
//! The UI observes the pending notification through [`Notifier::subscribe`].
//! When a Tokio runtime is available a timer task clears the channel at the
//! deadline; without one, [`Notifier::current`] still hides expired
//! notifications because the deadline is checked on every read.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::line::CartLine;

/// A pending "item added" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Snapshot of the line after the add/merge.
    pub line: CartLine,
    pub shown_at: Instant,
    pub expires_at: Instant,
    generation: u64,
}

impl Notification {
    /// Whether the notification has passed its deadline at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Single-slot notification emitter.
#[derive(Debug)]
pub struct Notifier {
    timeout: Duration,
    state: Arc<watch::Sender<Option<Notification>>>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Notifier {
    /// Create an emitter whose notifications dismiss after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            timeout,
            state: Arc::new(state),
            generation: 0,
            timer: None,
        }
    }

    /// Show `line`, replacing any pending notification.
    pub fn notify(&mut self, line: CartLine) -> Notification {
        self.cancel_timer();
        self.generation += 1;

        let shown_at = Instant::now();
        let notification = Notification {
            line,
            shown_at,
            expires_at: shown_at + self.timeout,
            generation: self.generation,
        };
        self.state.send_replace(Some(notification.clone()));

        if let Ok(runtime) = Handle::try_current() {
            let state = Arc::clone(&self.state);
            let generation = self.generation;
            let deadline = notification.expires_at;
            self.timer = Some(runtime.spawn(async move {
                sleep_until(deadline).await;
                dismiss_generation(&state, generation);
            }));
        }

        debug!(line_id = %notification.line.id, "Notification shown");
        notification
    }

    /// The pending notification, if any and not yet expired.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        let now = Instant::now();
        self.state
            .borrow()
            .as_ref()
            .filter(|n| !n.is_expired_at(now))
            .cloned()
    }

    /// Dismiss the pending notification early. Idempotent.
    pub fn close(&mut self) {
        self.cancel_timer();
        self.state.send_if_modified(|pending| pending.take().is_some());
    }

    /// Watch the pending notification slot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.state.subscribe()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Clear the slot only if it still holds the notification `generation`.
fn dismiss_generation(state: &watch::Sender<Option<Notification>>, generation: u64) {
    state.send_if_modified(|pending| {
        if pending.as_ref().is_some_and(|n| n.generation == generation) {
            *pending = None;
            true
        } else {
            false
        }
    });
}
