//! Incremental reveal of a filtered view.
//!
//! A `RevealController` hands out fixed-size batches of the view to a
//! `Materializer`. At most one batch is in flight at a time: `begin_batch`
//! claims the next slice and `finish_batch` commits it. Redundant triggers
//! (a button press racing a scroll-proximity signal) that land between the
//! two get nothing. `reset_and_render` invalidates any batch still in flight.

use crate::model::Donor;
use std::ops::Range;
use tracing::debug;

/// Scroll offset past which the back-to-top affordance shows.
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 400.0;

/// The rendering side of the reveal. Receives batches in view order.
pub trait Materializer {
    fn clear(&mut self);
    fn append(&mut self, batch: &[Donor]);
}

/// In-memory materializer: the donors currently shown.
#[derive(Debug, Clone, Default)]
pub struct VisibleList {
    pub items: Vec<Donor>,
}

impl Materializer for VisibleList {
    fn clear(&mut self) {
        self.items.clear();
    }

    fn append(&mut self, batch: &[Donor]) {
        self.items.extend_from_slice(batch);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub range: Range<usize>,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStatus {
    pub total: usize,
    pub shown: usize,
}

impl LoadStatus {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }

    /// The "load more" control is hidden exactly when nothing is left.
    pub fn load_more_visible(&self) -> bool {
        !self.is_empty() && !self.is_done()
    }
}

#[derive(Debug, Clone)]
pub struct RevealController {
    batch_size: usize,
    visible_count: usize,
    appending: bool,
    generation: u64,
}

impl RevealController {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            visible_count: 0,
            appending: false,
            generation: 0,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Takes effect from the next batch; callers reset to re-window.
    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size.max(1);
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_appending(&self) -> bool {
        self.appending
    }

    pub fn begin_batch(&mut self, total: usize) -> Option<PendingBatch> {
        if self.appending || self.visible_count >= total {
            return None;
        }
        self.appending = true;
        let end = (self.visible_count + self.batch_size).min(total);
        Some(PendingBatch {
            range: self.visible_count..end,
            generation: self.generation,
        })
    }

    /// Commits a batch from `begin_batch`. Batches claimed before the last
    /// reset are ignored.
    pub fn finish_batch(&mut self, batch: PendingBatch) {
        if batch.generation != self.generation {
            return;
        }
        self.visible_count = batch.range.end;
        self.appending = false;
    }

    /// Materializes the next batch. Returns how many donors were appended;
    /// 0 when a batch is in flight or the view is exhausted.
    pub fn append_next_batch<M: Materializer + ?Sized>(&mut self, view: &[Donor], out: &mut M) -> usize {
        let Some(batch) = self.begin_batch(view.len()) else {
            return 0;
        };
        let chunk = &view[batch.range.clone()];
        out.append(chunk);
        let n = chunk.len();
        self.finish_batch(batch);
        debug!(appended = n, visible = self.visible_count, total = view.len(), "batch materialized");
        n
    }

    pub fn reset_and_render<M: Materializer + ?Sized>(&mut self, view: &[Donor], out: &mut M) -> usize {
        out.clear();
        self.visible_count = 0;
        self.appending = false;
        self.generation += 1;
        if view.is_empty() {
            return 0;
        }
        self.append_next_batch(view, out)
    }

    pub fn status(&self, total: usize) -> LoadStatus {
        LoadStatus {
            total,
            shown: self.visible_count.min(total),
        }
    }
}

/// Fires when the trailing sentinel comes within `margin_px` of the
/// viewport's bottom edge.
#[derive(Debug, Clone, Copy)]
pub struct ProximityProbe {
    pub margin_px: f64,
}

impl ProximityProbe {
    pub fn new(margin_px: f64) -> Self {
        Self { margin_px }
    }

    /// `distance_px` is the sentinel's top minus the viewport's bottom;
    /// negative once it is on screen.
    pub fn in_range(&self, distance_px: f64) -> bool {
        distance_px.is_finite() && distance_px <= self.margin_px
    }
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y >= SCROLL_TOP_THRESHOLD_PX
}

/// Page-at-a-time navigation over a view, as an alternative to append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    page: usize,
}

impl Pager {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn page_count(total: usize, page_size: usize) -> usize {
        if total == 0 {
            return 0;
        }
        total.div_ceil(page_size.max(1))
    }

    pub fn next(&mut self, total: usize, page_size: usize) -> bool {
        if self.page + 1 < Self::page_count(total, page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn range(&self, total: usize, page_size: usize) -> Range<usize> {
        let size = page_size.max(1);
        let start = (self.page * size).min(total);
        start..(start + size).min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donors(n: usize) -> Vec<Donor> {
        (1..=n)
            .map(|i| Donor {
                name: format!("D{i}"),
                amount: (100 - i) as u64,
                avatar: String::new(),
                is_anonymous: false,
                social: None,
                rank: i,
                date: String::new(),
            })
            .collect()
    }

    fn ranks(list: &VisibleList) -> Vec<usize> {
        list.items.iter().map(|d| d.rank).collect()
    }

    #[test]
    fn test_batches_of_two_over_five() {
        let view = donors(5);
        let mut ctl = RevealController::new(2);
        let mut out = VisibleList::default();
        let mut counts = Vec::new();
        for _ in 0..4 {
            ctl.append_next_batch(&view, &mut out);
            counts.push(ctl.visible_count());
        }
        assert_eq!(counts, vec![2, 4, 5, 5]);
        assert_eq!(ranks(&out), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reset_renders_first_batch() {
        let view = donors(5);
        let mut ctl = RevealController::new(3);
        let mut out = VisibleList::default();
        ctl.append_next_batch(&view, &mut out);
        ctl.append_next_batch(&view, &mut out);
        assert_eq!(ctl.reset_and_render(&view, &mut out), 3);
        assert_eq!(ranks(&out), vec![1, 2, 3]);
        assert_eq!(ctl.visible_count(), 3);
    }

    #[test]
    fn test_reset_on_empty_view() {
        let mut ctl = RevealController::new(3);
        let mut out = VisibleList::default();
        ctl.reset_and_render(&donors(4), &mut out);
        assert_eq!(ctl.reset_and_render(&[], &mut out), 0);
        assert!(out.items.is_empty());
        assert_eq!(ctl.visible_count(), 0);
        let status = ctl.status(0);
        assert!(status.is_empty());
        assert!(!status.load_more_visible());
    }

    #[test]
    fn test_in_flight_batch_blocks_redundant_triggers() {
        let view = donors(5);
        let mut ctl = RevealController::new(2);
        let mut out = VisibleList::default();

        let pending = ctl.begin_batch(view.len()).unwrap();
        assert!(ctl.is_appending());
        // Button and proximity signal both fire before the batch lands.
        assert_eq!(ctl.append_next_batch(&view, &mut out), 0);
        assert_eq!(ctl.append_next_batch(&view, &mut out), 0);
        assert!(ctl.begin_batch(view.len()).is_none());

        out.append(&view[pending.range.clone()]);
        ctl.finish_batch(pending);
        ctl.append_next_batch(&view, &mut out);
        assert_eq!(ranks(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_back_to_back_calls_never_duplicate() {
        let view = donors(7);
        let mut ctl = RevealController::new(3);
        let mut out = VisibleList::default();
        for _ in 0..10 {
            ctl.append_next_batch(&view, &mut out);
            ctl.append_next_batch(&view, &mut out);
        }
        assert_eq!(ranks(&out), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_stale_batch_ignored_after_reset() {
        let view = donors(5);
        let mut ctl = RevealController::new(2);
        let mut out = VisibleList::default();
        let stale = ctl.begin_batch(view.len()).unwrap();
        ctl.reset_and_render(&view, &mut out);
        ctl.finish_batch(stale);
        assert_eq!(ctl.visible_count(), 2);
        assert!(!ctl.is_appending());
    }

    #[test]
    fn test_status_projection() {
        let view = donors(5);
        let mut ctl = RevealController::new(2);
        let mut out = VisibleList::default();
        ctl.reset_and_render(&view, &mut out);
        let s = ctl.status(view.len());
        assert_eq!((s.shown, s.total), (2, 5));
        assert!(s.load_more_visible());

        ctl.append_next_batch(&view, &mut out);
        ctl.append_next_batch(&view, &mut out);
        let s = ctl.status(view.len());
        assert_eq!((s.shown, s.total), (5, 5));
        assert!(s.is_done());
        assert!(!s.load_more_visible());

        // A narrower view than what was revealed clamps `shown`.
        assert_eq!(ctl.status(3).shown, 3);
    }

    #[test]
    fn test_batch_size_change() {
        let view = donors(10);
        let mut ctl = RevealController::new(2);
        let mut out = VisibleList::default();
        ctl.reset_and_render(&view, &mut out);
        ctl.set_batch_size(5);
        ctl.reset_and_render(&view, &mut out);
        assert_eq!(out.items.len(), 5);
        ctl.set_batch_size(0);
        assert_eq!(ctl.batch_size(), 1);
    }

    #[test]
    fn test_proximity_probe() {
        let probe = ProximityProbe::new(320.0);
        assert!(probe.in_range(320.0));
        assert!(probe.in_range(-50.0));
        assert!(!probe.in_range(321.0));
        assert!(!probe.in_range(f64::NAN));
    }

    #[test]
    fn test_scroll_top_threshold() {
        assert!(!scroll_top_visible(399.0));
        assert!(scroll_top_visible(400.0));
    }

    #[test]
    fn test_pager() {
        let mut pager = Pager::default();
        assert_eq!(Pager::page_count(5, 2), 3);
        assert_eq!(Pager::page_count(0, 2), 0);
        assert_eq!(pager.range(5, 2), 0..2);
        assert!(!pager.prev());
        assert!(pager.next(5, 2));
        assert!(pager.next(5, 2));
        assert_eq!(pager.range(5, 2), 4..5);
        assert!(!pager.next(5, 2));
        assert_eq!(pager.page(), 2);
        assert!(pager.prev());
        assert_eq!(pager.range(5, 2), 2..4);
        pager.reset();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.range(0, 2), 0..0);
    }
}
