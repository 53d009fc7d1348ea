//! Hover Preview Controller — debounced popup visibility for one tab entry.
//!
//! Entering the entry arms a single-shot timer; the popup shows when it fires.
//! Leaving at any point cancels the timer and hides the popup. At most one
//! timer is live per controller, and dropping the controller aborts it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Popup visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Hidden,
    /// Timer running.
    Pending,
    Shown,
}

pub struct HoverPreviewController {
    delay: Duration,
    state: Arc<watch::Sender<HoverState>>,
    generation: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
}

impl HoverPreviewController {
    pub fn new(delay: Duration) -> Self {
        let (state, _) = watch::channel(HoverState::Hidden);
        Self {
            delay,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            timer: None,
        }
    }

    pub fn state(&self) -> HoverState {
        *self.state.borrow()
    }

    pub fn is_shown(&self) -> bool {
        self.state() == HoverState::Shown
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Receives every state change, including the timer firing.
    pub fn subscribe(&self) -> watch::Receiver<HoverState> {
        self.state.subscribe()
    }

    /// Pointer entered the entry. Must be called from within a tokio runtime.
    pub fn on_mouse_enter(&mut self) {
        if self.state() == HoverState::Shown {
            return;
        }
        self.cancel_timer();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Cannot schedule hover preview: {}", e);
                // No timer is live, so Pending would never resolve.
                self.state.send_replace(HoverState::Hidden);
                return;
            }
        };

        let generation = self.generation.load(Ordering::SeqCst);
        let deadline = Instant::now() + self.delay;
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        self.state.send_replace(HoverState::Pending);
        self.timer = Some(handle.spawn(async move {
            sleep_until(deadline).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            state.send_if_modified(|s| {
                if *s == HoverState::Pending {
                    log::debug!("Hover preview shown");
                    *s = HoverState::Shown;
                    true
                } else {
                    false
                }
            });
        }));
    }

    /// Pointer left the entry. Always ends in `Hidden`.
    pub fn on_mouse_leave(&mut self) {
        self.cancel_timer();
        self.state.send_if_modified(|s| {
            let changed = *s != HoverState::Hidden;
            *s = HoverState::Hidden;
            changed
        });
    }

    fn cancel_timer(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for HoverPreviewController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
