use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::virtual_list::VisibleRange;

pub type SinkError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSample {
    pub duration: Duration,
    pub row_count: usize,
    pub range_width: usize,
}

/// Receives render timings. Failures are logged and dropped by the caller.
pub trait RenderSink {
    fn record(&mut self, sample: &RenderSample) -> Result<(), SinkError>;
}

/// Emits each sample as a `debug` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl RenderSink for TracingSink {
    fn record(&mut self, sample: &RenderSample) -> Result<(), SinkError> {
        tracing::debug!(
            duration_us = sample.duration.as_micros() as u64,
            rows = sample.row_count,
            range_width = sample.range_width,
            "list rendered"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderTimer {
    started: Instant,
}

/// Optional render timing. When disabled no clock is read and nothing is
/// allocated per pass.
#[derive(Default)]
pub struct Instrumentation {
    sink: Option<Box<dyn RenderSink>>,
    pending: Option<RenderSample>,
}

impl fmt::Debug for Instrumentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumentation")
            .field("enabled", &self.is_enabled())
            .field("pending", &self.pending)
            .finish()
    }
}

impl Instrumentation {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Box<dyn RenderSink>) -> Self {
        Self {
            sink: Some(sink),
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn RenderSink>>) {
        self.sink = sink;
        self.pending = None;
    }

    pub fn begin(&self) -> Option<RenderTimer> {
        self.sink.as_ref().map(|_| RenderTimer {
            started: Instant::now(),
        })
    }

    /// Stores the measurement; it reaches the sink on the next
    /// [`Instrumentation::flush`].
    pub fn finish(
        &mut self,
        timer: Option<RenderTimer>,
        row_count: usize,
        range: Option<VisibleRange>,
    ) {
        let Some(timer) = timer else {
            return;
        };
        self.pending = Some(RenderSample {
            duration: timer.started.elapsed(),
            row_count,
            range_width: range.map_or(0, |range| range.len()),
        });
    }

    /// Forwards the deferred sample. Called at the start of the next frame.
    pub fn flush(&mut self) {
        let Some(sample) = self.pending.take() else {
            return;
        };
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.record(&sample) {
            tracing::warn!(error = %err, "render sink rejected sample");
        }
    }

    pub fn discard_pending(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
