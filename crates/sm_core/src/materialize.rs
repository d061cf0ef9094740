use crate::virtual_list::VisibleRange;

/// Absolute placement of one materialized row inside the scroll content.
/// Rows always span the full container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub top: f32,
    pub height: f32,
}

impl RowStyle {
    pub fn for_index(index: usize, row_extent: f32) -> Self {
        Self {
            top: index as f32 * row_extent,
            height: row_extent,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<'a, T, R> {
    pub index: usize,
    pub item: &'a T,
    pub style: RowStyle,
    pub content: R,
}

/// Builds rows for `range`, calling `factory` only for indices present in
/// `rows`. A stale range against a shorter collection skips the missing slots.
pub fn materialize<'a, T, R, F>(
    rows: &'a [T],
    range: Option<VisibleRange>,
    row_extent: f32,
    mut factory: F,
) -> Vec<RenderedRow<'a, T, R>>
where
    F: FnMut(usize, &'a T, RowStyle) -> R,
{
    let Some(range) = range else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(range.len().min(rows.len()));
    for index in range.indices() {
        let Some(item) = rows.get(index) else {
            continue;
        };
        let style = RowStyle::for_index(index, row_extent);
        let content = factory(index, item, style);
        out.push(RenderedRow {
            index,
            item,
            style,
            content,
        });
    }
    out
}

pub fn total_extent(total_rows: usize, row_extent: f32) -> f32 {
    total_rows as f32 * row_extent
}

/// Remembers the last range reported to the owner so repeated passes over the
/// same window stay silent.
#[derive(Debug, Clone, Default)]
pub struct RangeNotifier {
    last: Option<VisibleRange>,
}

impl RangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<VisibleRange> {
        self.last
    }

    /// Returns the range when it should be reported. An empty pass resets the
    /// memory but never reports.
    pub fn observe(&mut self, range: Option<VisibleRange>) -> Option<VisibleRange> {
        if range == self.last {
            return None;
        }
        self.last = range;
        range
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_list::compute_visible_range;

    #[test]
    fn t_mat_001_positions_rows_by_index() {
        let rows: Vec<u32> = (0..100).collect();
        let range = compute_visible_range(600.0, 120.0, 60.0, rows.len(), 1);
        let rendered = materialize(&rows, range, 60.0, |index, item, _| {
            format!("{index}:{item}")
        });

        assert_eq!(rendered.first().map(|row| row.index), Some(9));
        assert_eq!(rendered.last().map(|row| row.index), Some(13));
        for row in &rendered {
            assert_eq!(row.style.top, row.index as f32 * 60.0);
            assert_eq!(row.style.height, 60.0);
            assert_eq!(row.content, format!("{}:{}", row.index, row.item));
        }
    }

    #[test]
    fn t_mat_002_empty_rows_materialize_nothing() {
        let rows: Vec<u32> = Vec::new();
        let mut calls = 0;
        let rendered = materialize(&rows, None, 60.0, |_, _, _| calls += 1);
        assert!(rendered.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn t_mat_003_stale_range_skips_missing_rows() {
        let rows = vec!["a", "b", "c"];
        let stale = Some(VisibleRange {
            start_index: 1,
            end_index: 8,
        });
        let rendered = materialize(&rows, stale, 10.0, |_, item, _| item.to_string());
        let indices: Vec<usize> = rendered.iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn t_mat_007_inverted_range_materializes_nothing() {
        let rows = vec!["a", "b", "c"];
        let inverted = VisibleRange {
            start_index: 2,
            end_index: 0,
        };
        assert_eq!(inverted.len(), 0);
        let rendered = materialize(&rows, Some(inverted), 10.0, |_, item, _| item.to_string());
        assert!(rendered.is_empty());
    }

    #[test]
    fn t_mat_004_factory_runs_only_inside_window() {
        let rows: Vec<u32> = (0..10_000).collect();
        let range = compute_visible_range(0.0, 400.0, 60.0, rows.len(), 5);
        let mut calls = 0usize;
        materialize(&rows, range, 60.0, |_, _, _| calls += 1);
        assert_eq!(calls, 13);
        assert_eq!(total_extent(rows.len(), 60.0), 600_000.0);
    }

    #[test]
    fn t_mat_005_notifier_deduplicates_identical_ranges() {
        let mut notifier = RangeNotifier::new();
        let a = Some(VisibleRange {
            start_index: 0,
            end_index: 12,
        });
        let b = Some(VisibleRange {
            start_index: 1,
            end_index: 13,
        });

        assert_eq!(notifier.observe(a), a);
        assert_eq!(notifier.observe(a), None);
        assert_eq!(notifier.observe(b), b);
        assert_eq!(notifier.observe(b), None);
    }

    #[test]
    fn t_mat_006_empty_pass_never_notifies() {
        let mut notifier = RangeNotifier::new();
        assert_eq!(notifier.observe(None), None);
        assert_eq!(notifier.observe(None), None);

        let a = Some(VisibleRange {
            start_index: 0,
            end_index: 3,
        });
        assert_eq!(notifier.observe(a), a);
        assert_eq!(notifier.observe(None), None);
        assert_eq!(notifier.observe(a), a);
    }
}
