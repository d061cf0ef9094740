/// Inclusive index span of the rows a list should materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleRange {
    /// Row count of the span; an inverted range counts as zero.
    pub fn len(&self) -> usize {
        self.end_index
            .checked_sub(self.start_index)
            .map_or(0, |span| span + 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub row_extent: f32,
    pub viewport_extent: f32,
    pub overscan: usize,
}

impl ViewportGeometry {
    pub fn new(row_extent: f32, viewport_extent: f32, overscan: usize) -> Self {
        Self {
            row_extent,
            viewport_extent,
            overscan,
        }
    }

    pub fn visible_range(&self, offset: f32, total_rows: usize) -> Option<VisibleRange> {
        compute_visible_range(
            offset,
            self.viewport_extent,
            self.row_extent,
            total_rows,
            self.overscan,
        )
    }

    pub fn content_extent(&self, total_rows: usize) -> f32 {
        total_rows as f32 * self.row_extent
    }
}

/// Computes the rows to materialize for a fixed-extent list.
///
/// Returns `None` for an empty collection. Offsets past the end clip to the
/// last row instead of producing an inverted range.
///
/// `row_extent` and `viewport_extent` must be positive; they are not checked
/// here and non-positive values yield a degenerate range.
pub fn compute_visible_range(
    offset: f32,
    viewport_extent: f32,
    row_extent: f32,
    total_rows: usize,
    overscan: usize,
) -> Option<VisibleRange> {
    if total_rows == 0 {
        return None;
    }

    let last = total_rows - 1;
    let first_visible = (offset / row_extent).floor().max(0.0) as usize;
    let last_visible = ((offset + viewport_extent) / row_extent).ceil().max(0.0) as usize;

    let end_index = last_visible.saturating_add(overscan).min(last);
    let start_index = first_visible.saturating_sub(overscan).min(end_index);

    Some(VisibleRange {
        start_index,
        end_index,
    })
}
