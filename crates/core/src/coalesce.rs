//! Debounced, coalescing writes.
//!
//! Switching the display mode updates the URL query. Rapid toggles must collapse into a single
//! write of the last value, and a pending write must not outlive its owner unflushed. A
//! [`CoalescingWriter`] holds at most one pending value and one timer; scheduling a new value
//! replaces both.

use crate::config::ViewConfig;
use crate::error::ViewResult;
use crate::mode::DisplayMode;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// The pending value, tagged with the generation of the timer armed for it.
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> Slot<T> {
    /// Stores `value` and returns the generation a timer must present to take it.
    fn arm(&mut self, value: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.value = Some(value);
        self.generation
    }

    /// Takes the value only if no newer value was armed since `generation`.
    fn take_armed(&mut self, generation: u64) -> Option<T> {
        if self.generation == generation {
            self.value.take()
        } else {
            None
        }
    }
}

pub struct CoalescingWriter<T: Send + 'static> {
    runtime: Handle,
    delay: Duration,
    sink: Sink<T>,
    pending: Arc<Mutex<Slot<T>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> CoalescingWriter<T> {
    /// Creates a writer that calls `sink` once `delay` has passed without a new value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ViewError::NoRuntime`] when called outside a tokio runtime.
    pub fn new(delay: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> ViewResult<Self> {
        Ok(Self {
            runtime: Handle::try_current()?,
            delay,
            sink: Arc::new(sink),
            pending: Arc::new(Mutex::new(Slot {
                generation: 0,
                value: None,
            })),
            timer: Mutex::new(None),
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true if a write is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .is_some()
    }

    /// Replaces the pending value and restarts the timer.
    ///
    /// A timer that is already past its sleep when a new value arrives finds a newer generation
    /// in the slot and leaves the value to the timer armed with it.
    pub fn schedule(&self, value: T) {
        let generation = self.pending.lock().unwrap_or_else(PoisonError::into_inner).arm(value);

        let pending = Arc::clone(&self.pending);
        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let value = pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take_armed(generation);
            if let Some(value) = value {
                sink(value);
            }
        });

        if let Some(previous) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task)
        {
            previous.abort();
        }
    }

    /// Writes the pending value now, if there is one.
    pub fn flush(&self) {
        self.stop_timer();
        let value = self.pending.lock().unwrap_or_else(PoisonError::into_inner).value.take();
        if let Some(value) = value {
            tracing::trace!("flushing pending write");
            (self.sink)(value);
        }
    }

    /// Drops the pending value without writing it.
    pub fn cancel(&self) {
        self.stop_timer();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .take();
    }

    fn stop_timer(&self) {
        if let Some(timer) = self.timer.lock().unwrap_or_else(PoisonError::into_inner).take() {
            timer.abort();
        }
    }
}

impl<T: Send + 'static> Drop for CoalescingWriter<T> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl<T: Send + 'static> std::fmt::Debug for CoalescingWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoalescingWriter")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Writer that persists the selected display mode as a query string (`mode=external`).
pub fn display_mode_writer(
    sink: impl Fn(String) + Send + Sync + 'static,
    config: &ViewConfig,
) -> ViewResult<CoalescingWriter<DisplayMode>> {
    CoalescingWriter::new(config.debounce(), move |mode: DisplayMode| {
        tracing::debug!("persisting display mode {mode}");
        sink(mode.to_query())
    })
}
