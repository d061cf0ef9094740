//! Property-based invariant tests for the windowed list engine.
//!
//! 1. Range bounds: `start <= end < total` for non-empty lists, none otherwise.
//! 2. Monotonicity: a larger offset never moves either edge backwards.
//! 3. Containment: the geometric span (clipped) sits inside the range.
//! 4. Determinism: identical inputs give identical outputs.
//! 5. Debounce: a burst settles exactly once, at `last + delay`.
//! 6. Notification dedup: replaying the same offset never re-notifies.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use sm_core::scroll::ScrollTracker;
use sm_core::{compute_visible_range, VirtualList, VirtualListOptions};

// ── Helpers ─────────────────────────────────────────────────────────────

fn geometry_strategy() -> impl Strategy<Value = (f32, f32, usize)> {
    (1u32..=200, 1u32..=2_000, 0usize..=20)
        .prop_map(|(row, viewport, overscan)| (row as f32, viewport as f32, overscan))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Range bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn range_stays_inside_collection(
        (row, viewport, overscan) in geometry_strategy(),
        total in 0usize..=50_000,
        offset in 0u32..=2_000_000,
    ) {
        let range = compute_visible_range(offset as f32, viewport, row, total, overscan);
        match range {
            None => prop_assert_eq!(total, 0),
            Some(range) => {
                prop_assert!(total > 0);
                prop_assert!(range.start_index <= range.end_index);
                prop_assert!(range.end_index < total);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn larger_offset_never_moves_edges_back(
        (row, viewport, overscan) in geometry_strategy(),
        total in 1usize..=50_000,
        a in 0u32..=1_000_000,
        b in 0u32..=1_000_000,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let first = compute_visible_range(low as f32, viewport, row, total, overscan).unwrap();
        let second = compute_visible_range(high as f32, viewport, row, total, overscan).unwrap();
        prop_assert!(first.start_index <= second.start_index);
        prop_assert!(first.end_index <= second.end_index);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Containment of the geometric span
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geometric_span_is_covered(
        (row, viewport, overscan) in geometry_strategy(),
        total in 1usize..=50_000,
        offset in 0u32..=1_000_000,
    ) {
        let offset = offset as f32;
        let range = compute_visible_range(offset, viewport, row, total, overscan).unwrap();
        let first = (offset / row).floor() as usize;
        let last = ((offset + viewport) / row).ceil() as usize;
        if first < total {
            prop_assert!(range.start_index <= first);
            prop_assert!(range.end_index >= last.min(total - 1));
        }
        prop_assert!(range.len() <= last - first + 1 + 2 * overscan);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn computation_is_idempotent(
        (row, viewport, overscan) in geometry_strategy(),
        total in 0usize..=50_000,
        offset in 0u32..=2_000_000,
    ) {
        let a = compute_visible_range(offset as f32, viewport, row, total, overscan);
        let b = compute_visible_range(offset as f32, viewport, row, total, overscan);
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Debounce settles once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn burst_settles_exactly_once(
        gaps in proptest::collection::vec(0u64..150, 1..40),
        delay in 1u64..=500,
    ) {
        let delay = Duration::from_millis(delay);
        let t0 = Instant::now();
        let mut tracker = ScrollTracker::new(delay);

        let mut at = t0;
        for (step, gap) in gaps.iter().enumerate() {
            at += Duration::from_millis((*gap).min(delay.as_millis() as u64 - 1));
            tracker.on_scroll(step as f32, at);
            // Nothing may settle inside the burst.
            prop_assert!(!tracker.poll(at));
        }

        let mut settles = 0;
        for probe_ms in (0..=delay.as_millis() as u64 * 3).step_by(7) {
            let now = at + Duration::from_millis(probe_ms);
            if tracker.poll(now) {
                settles += 1;
                prop_assert!(now >= at + delay);
            }
        }
        if tracker.poll(at + delay * 3) {
            settles += 1;
        }
        prop_assert_eq!(settles, 1);
        prop_assert!(!tracker.is_scrolling());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Notification dedup
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn replayed_offset_never_renotifies(
        offsets in proptest::collection::vec(0u32..=100_000, 1..30),
        total in 1usize..=5_000,
    ) {
        let items: Vec<usize> = (0..total).collect();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut list = VirtualList::new(VirtualListOptions::default());
        list.set_on_items_rendered(Some(Box::new(move |start, end| {
            sink.borrow_mut().push((start, end));
        })));

        let t0 = Instant::now();
        for offset in offsets {
            list.on_scroll(offset as f32, t0);
            list.render(&items, false, |_, _, _| ());
            let before = seen.borrow().len();
            list.render(&items, false, |_, _, _| ());
            prop_assert_eq!(seen.borrow().len(), before);
        }

        let notified = seen.borrow();
        for pair in notified.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }
}
