use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::MappingError;
use crate::instrument::{Instrumentation, RenderSink};
use crate::materialize::{materialize, total_extent, RangeNotifier, RenderedRow, RowStyle};
use crate::scroll::{ScrollCallback, ScrollTracker, DEFAULT_SCROLL_DEBOUNCE};
use crate::virtual_list::{ViewportGeometry, VisibleRange};

pub const DEFAULT_ITEM_HEIGHT: f32 = 60.0;
pub const DEFAULT_LIST_HEIGHT: f32 = 400.0;
pub const DEFAULT_OVERSCAN: usize = 5;
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";
pub const DEFAULT_EMPTY_MESSAGE: &str = "No items to display";

pub type ItemsRenderedCallback = Box<dyn FnMut(usize, usize)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListWidth {
    Pixels(f32),
    Percent(f32),
}

impl Default for ListWidth {
    fn default() -> Self {
        Self::Percent(100.0)
    }
}

impl ListWidth {
    pub fn resolve(&self, container: f32) -> f32 {
        match *self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => container * pct / 100.0,
        }
    }
}

impl fmt::Display for ListWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl FromStr for ListWidth {
    type Err = MappingError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let invalid = || MappingError::InvalidWidth(input.to_string());
        let (number, percent) = if let Some(rest) = trimmed.strip_suffix('%') {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_suffix("px") {
            (rest, false)
        } else {
            (trimmed, false)
        };
        let value = number.trim().parse::<f32>().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Pixels(value)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirtualListOptions {
    pub item_height: f32,
    pub height: f32,
    pub width: ListWidth,
    pub overscan_count: usize,
    pub search_term: String,
    pub empty_state: Option<String>,
    pub loading_state: Option<String>,
    pub debounce: Duration,
}

impl Default for VirtualListOptions {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            height: DEFAULT_LIST_HEIGHT,
            width: ListWidth::default(),
            overscan_count: DEFAULT_OVERSCAN,
            search_term: String::new(),
            empty_state: None,
            loading_state: None,
            debounce: DEFAULT_SCROLL_DEBOUNCE,
        }
    }
}

impl VirtualListOptions {
    pub fn geometry(&self) -> ViewportGeometry {
        ViewportGeometry::new(self.item_height, self.height, self.overscan_count)
    }

    pub fn empty_message(&self) -> String {
        if let Some(custom) = &self.empty_state {
            return custom.clone();
        }
        let term = self.search_term.trim();
        if term.is_empty() {
            DEFAULT_EMPTY_MESSAGE.to_string()
        } else {
            format!("No results found for \"{term}\"")
        }
    }

    pub fn loading_message(&self) -> String {
        self.loading_state
            .clone()
            .unwrap_or_else(|| DEFAULT_LOADING_MESSAGE.to_string())
    }
}

/// Output of one render pass.
#[derive(Debug)]
pub enum ListFrame<'a, T, R> {
    Loading {
        message: String,
    },
    Empty {
        message: String,
    },
    Rows {
        rows: Vec<RenderedRow<'a, T, R>>,
        range: VisibleRange,
        total_extent: f32,
    },
}

impl<T, R> ListFrame<'_, T, R> {
    pub fn rendered_len(&self) -> usize {
        match self {
            Self::Rows { rows, .. } => rows.len(),
            _ => 0,
        }
    }

    pub fn range(&self) -> Option<VisibleRange> {
        match self {
            Self::Rows { range, .. } => Some(*range),
            _ => None,
        }
    }
}

/// One mounted list: scroll state, range notifications and instrumentation.
/// Rows are passed in on every render and never retained.
pub struct VirtualList {
    options: VirtualListOptions,
    tracker: ScrollTracker,
    notifier: RangeNotifier,
    instrumentation: Instrumentation,
    on_items_rendered: Option<ItemsRenderedCallback>,
}

impl fmt::Debug for VirtualList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("options", &self.options)
            .field("tracker", &self.tracker)
            .field("last_range", &self.notifier.last())
            .field("instrumentation", &self.instrumentation)
            .finish()
    }
}

impl Default for VirtualList {
    fn default() -> Self {
        Self::new(VirtualListOptions::default())
    }
}

impl VirtualList {
    pub fn new(options: VirtualListOptions) -> Self {
        let tracker = ScrollTracker::new(options.debounce);
        Self {
            options,
            tracker,
            notifier: RangeNotifier::new(),
            instrumentation: Instrumentation::disabled(),
            on_items_rendered: None,
        }
    }

    pub fn options(&self) -> &VirtualListOptions {
        &self.options
    }

    /// Replaces the options. The scroll offset is kept; the next render
    /// recomputes the range against the new geometry.
    pub fn reconfigure(&mut self, options: VirtualListOptions) {
        self.tracker.set_debounce(options.debounce);
        self.options = options;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.options.search_term.clear();
        self.options.search_term.push_str(term);
    }

    pub fn set_on_scroll(&mut self, callback: Option<ScrollCallback>) {
        self.tracker.set_on_scroll(callback);
    }

    pub fn set_on_items_rendered(&mut self, callback: Option<ItemsRenderedCallback>) {
        self.on_items_rendered = callback;
    }

    pub fn set_render_sink(&mut self, sink: Option<Box<dyn RenderSink>>) {
        self.instrumentation.set_sink(sink);
    }

    pub fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    pub fn offset(&self) -> f32 {
        self.tracker.offset()
    }

    pub fn is_scrolling(&self) -> bool {
        self.tracker.is_scrolling()
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn on_scroll(&mut self, raw_offset: f32, now: Instant) {
        self.tracker.on_scroll(raw_offset, now);
    }

    /// Jumps back to the top without counting as a user scroll.
    pub fn reset_scroll(&mut self) {
        self.tracker.reset();
    }

    /// Per-frame housekeeping: fires the settle deadline and flushes the
    /// previous frame's render sample. Returns `true` when scrolling settled.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.instrumentation.flush();
        self.tracker.poll(now)
    }

    pub fn visible_range(&self, total_rows: usize) -> Option<VisibleRange> {
        self.options
            .geometry()
            .visible_range(self.tracker.offset(), total_rows)
    }

    pub fn content_extent(&self, total_rows: usize) -> f32 {
        total_extent(total_rows, self.options.item_height)
    }

    pub fn render<'a, T, R, F>(
        &mut self,
        items: &'a [T],
        is_loading: bool,
        factory: F,
    ) -> ListFrame<'a, T, R>
    where
        F: FnMut(usize, &'a T, RowStyle) -> R,
    {
        let timer = self.instrumentation.begin();

        let frame = if is_loading {
            self.notifier.reset();
            ListFrame::Loading {
                message: self.options.loading_message(),
            }
        } else {
            let range = self.visible_range(items.len());
            let frame = match range {
                None => ListFrame::Empty {
                    message: self.options.empty_message(),
                },
                Some(range) => ListFrame::Rows {
                    rows: materialize(items, Some(range), self.options.item_height, factory),
                    range,
                    total_extent: self.content_extent(items.len()),
                },
            };
            // Owners hear about a range only once its rows exist.
            if let Some(changed) = self.notifier.observe(range) {
                tracing::trace!(
                    start = changed.start_index,
                    end = changed.end_index,
                    "visible range changed"
                );
                if let Some(callback) = self.on_items_rendered.as_mut() {
                    callback(changed.start_index, changed.end_index);
                }
            }
            frame
        };

        self.instrumentation
            .finish(timer, items.len(), frame.range());
        frame
    }

    /// Tears down timers and pending measurements. Scroll state itself goes
    /// away with the value.
    pub fn unmount(&mut self) {
        self.tracker.cancel();
        self.instrumentation.discard_pending();
    }
}

impl Drop for VirtualList {
    fn drop(&mut self) {
        self.unmount();
    }
}
