use std::fmt;
use std::time::{Duration, Instant};

pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(150);

pub type ScrollCallback = Box<dyn FnMut(f32)>;

/// Scroll offset plus a debounced "actively scrolling" flag.
///
/// The tracker never owns a timer thread. Hosts call [`ScrollTracker::poll`]
/// once per frame and can use [`ScrollTracker::time_until_settle`] to schedule
/// the next wake-up.
pub struct ScrollTracker {
    offset: f32,
    is_scrolling: bool,
    settle_at: Option<Instant>,
    debounce: Duration,
    on_scroll: Option<ScrollCallback>,
}

impl fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("offset", &self.offset)
            .field("is_scrolling", &self.is_scrolling)
            .field("settle_at", &self.settle_at)
            .field("debounce", &self.debounce)
            .field("has_callback", &self.on_scroll.is_some())
            .finish()
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DEBOUNCE)
    }
}

impl ScrollTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            offset: 0.0,
            is_scrolling: false,
            settle_at: None,
            debounce,
            on_scroll: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    pub fn set_on_scroll(&mut self, callback: Option<ScrollCallback>) {
        self.on_scroll = callback;
    }

    /// Records a raw scroll offset and re-arms the settle deadline.
    pub fn on_scroll(&mut self, raw_offset: f32, now: Instant) {
        self.offset = raw_offset;
        self.is_scrolling = true;
        // Replaces any pending deadline, so only one is ever live.
        self.settle_at = Some(now + self.debounce);
        if let Some(callback) = self.on_scroll.as_mut() {
            callback(raw_offset);
        }
    }

    /// Fires the settle deadline if it has passed. Returns `true` on the poll
    /// that clears `is_scrolling`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.settle_at {
            Some(deadline) if now >= deadline => {
                self.settle_at = None;
                self.is_scrolling = false;
                tracing::trace!(offset = self.offset, "scroll settled");
                true
            }
            _ => false,
        }
    }

    pub fn time_until_settle(&self, now: Instant) -> Option<Duration> {
        self.settle_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn has_pending_settle(&self) -> bool {
        self.settle_at.is_some()
    }

    /// Back to offset zero and idle, without notifying the scroll callback.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.is_scrolling = false;
        self.settle_at = None;
    }

    /// Drops the pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.settle_at = None;
    }
}
