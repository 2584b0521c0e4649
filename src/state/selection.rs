//! Drag selection over tiles.
//!
//! A primary-button press anchors a drag; while the button is held the pending set is the
//! rectangle between the anchor and the tile under the cursor; on release the pending set is
//! merged into (or removed from) the tagged set. Every membership change evicts the affected
//! coordinates from the tile cache so they are regenerated with the right colour.

use std::collections::HashSet;

use num_bigint::BigInt;

use super::tile_cache::{MarkerSets, TileCache};
use crate::model::TileCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Tagging,
    Untagging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Dragging(DragMode),
}

/// Every coordinate in the rectangle spanned by `a` and `b`, both ends inclusive.
pub fn span_rect(a: &TileCoord, b: &TileCoord) -> HashSet<TileCoord> {
    let (x0, x1) = ordered(&a.x, &b.x);
    let (y0, y1) = ordered(&a.y, &b.y);
    let mut rect = HashSet::new();
    let mut x = x0.clone();
    while &x <= x1 {
        let mut y = y0.clone();
        while &y <= y1 {
            rect.insert(TileCoord {
                x: x.clone(),
                y: y.clone(),
            });
            y += 1;
        }
        x += 1;
    }
    rect
}

fn ordered<'a>(a: &'a BigInt, b: &'a BigInt) -> (&'a BigInt, &'a BigInt) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone)]
pub struct Selection {
    tagged: HashSet<TileCoord>,
    pending: HashSet<TileCoord>,
    pending_previous: HashSet<TileCoord>,
    anchor: Option<TileCoord>,
    mode: DragMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            tagged: HashSet::new(),
            pending: HashSet::new(),
            pending_previous: HashSet::new(),
            anchor: None,
            mode: DragMode::Tagging,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        match self.anchor {
            Some(_) => SelectionPhase::Dragging(self.mode),
            None => SelectionPhase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<&TileCoord> {
        self.anchor.as_ref()
    }

    pub fn tagged(&self) -> &HashSet<TileCoord> {
        &self.tagged
    }

    pub fn pending(&self) -> &HashSet<TileCoord> {
        &self.pending
    }

    pub fn is_tagged(&self, coord: &TileCoord) -> bool {
        self.tagged.contains(coord)
    }

    pub fn markers(&self) -> MarkerSets<'_> {
        MarkerSets {
            tagged: &self.tagged,
            pending: &self.pending,
            pending_active: self.is_dragging() && self.mode == DragMode::Tagging,
        }
    }

    /// Start a drag at `tile`. The drag untags when it starts on a tagged tile. A press while
    /// already dragging is ignored.
    pub fn press(&mut self, tile: TileCoord, cache: &mut TileCache) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.mode = if self.tagged.contains(&tile) {
            DragMode::Untagging
        } else {
            DragMode::Tagging
        };
        cache.evict(&tile);
        self.pending = HashSet::from([tile.clone()]);
        self.pending_previous = self.pending.clone();
        self.anchor = Some(tile);
        true
    }

    /// Stretch the drag to `tile`. Only coordinates entering or leaving the pending rectangle
    /// are evicted. Returns whether anything changed.
    pub fn drag_to(&mut self, tile: &TileCoord, cache: &mut TileCache) -> bool {
        let Some(anchor) = &self.anchor else {
            return false;
        };
        self.pending = span_rect(anchor, tile);
        let changed: Vec<&TileCoord> = self
            .pending
            .symmetric_difference(&self.pending_previous)
            .collect();
        let any = !changed.is_empty();
        cache.evict_all(changed);
        self.pending_previous = self.pending.clone();
        any
    }

    /// Commit the drag. Returns how many coordinates were committed.
    pub fn release(&mut self, cache: &mut TileCache) -> usize {
        if self.anchor.take().is_none() {
            return 0;
        }
        cache.evict_all(&self.pending);
        let committed = self.pending.len();
        match self.mode {
            DragMode::Tagging => self.tagged.extend(self.pending.drain()),
            DragMode::Untagging => {
                for coord in self.pending.drain() {
                    self.tagged.remove(&coord);
                }
            }
        }
        self.pending_previous.clear();
        log::info!(
            "{:?} committed {} tiles, {} tagged",
            self.mode,
            committed,
            self.tagged.len()
        );
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(pairs: &[(i64, i64)]) -> HashSet<TileCoord> {
        pairs.iter().map(|&(x, y)| TileCoord::new(x, y)).collect()
    }

    fn block(xs: std::ops::RangeInclusive<i64>, ys: std::ops::RangeInclusive<i64>) -> HashSet<TileCoord> {
        xs.flat_map(|x| ys.clone().map(move |y| TileCoord::new(x, y)))
            .collect()
    }

    #[test]
    fn span_rect_handles_any_drag_direction() {
        let expected = block(5..=7, 3..=5);
        let a = TileCoord::new(5, 5);
        let b = TileCoord::new(7, 3);
        assert_eq!(span_rect(&a, &b), expected);
        assert_eq!(span_rect(&b, &a), expected);
        assert_eq!(
            span_rect(&TileCoord::new(7, 5), &TileCoord::new(5, 3)),
            expected
        );
    }

    #[test]
    fn span_rect_of_one_tile() {
        let t = TileCoord::new(-2, 9);
        assert_eq!(span_rect(&t, &t), coords(&[(-2, 9)]));
    }

    #[test]
    fn drag_then_release_tags_the_rectangle() {
        let mut cache = TileCache::new();
        let mut selection = Selection::new();
        assert!(selection.press(TileCoord::new(5, 5), &mut cache));
        assert_eq!(selection.phase(), SelectionPhase::Dragging(DragMode::Tagging));
        selection.drag_to(&TileCoord::new(7, 3), &mut cache);
        assert!(selection.markers().pending_active);
        assert_eq!(selection.release(&mut cache), 9);
        assert_eq!(selection.phase(), SelectionPhase::Idle);
        assert_eq!(selection.tagged(), &block(5..=7, 3..=5));
        assert!(selection.pending().is_empty());
        assert!(selection.anchor().is_none());
    }

    #[test]
    fn drag_starting_on_tagged_tile_untags() {
        let mut cache = TileCache::new();
        let mut selection = Selection::new();
        selection.press(TileCoord::new(5, 5), &mut cache);
        selection.drag_to(&TileCoord::new(7, 3), &mut cache);
        selection.release(&mut cache);
        selection.press(TileCoord::new(4, 4), &mut cache);
        selection.release(&mut cache);
        assert_eq!(selection.tagged().len(), 10);

        selection.press(TileCoord::new(5, 5), &mut cache);
        assert_eq!(selection.phase(), SelectionPhase::Dragging(DragMode::Untagging));
        assert!(!selection.markers().pending_active);
        selection.drag_to(&TileCoord::new(7, 3), &mut cache);
        selection.release(&mut cache);
        assert_eq!(selection.tagged(), &coords(&[(4, 4)]));
    }

    #[test]
    fn click_without_drag_toggles_one_tile() {
        let mut cache = TileCache::new();
        let mut selection = Selection::new();
        let tile = TileCoord::new(0, 0);
        selection.press(tile.clone(), &mut cache);
        selection.release(&mut cache);
        assert!(selection.is_tagged(&tile));
        selection.press(tile.clone(), &mut cache);
        selection.release(&mut cache);
        assert!(!selection.is_tagged(&tile));
    }

    #[test]
    fn drag_evicts_only_the_symmetric_difference() {
        use crate::model::WindowSize;
        use crate::state::camera::Camera;
        use crate::state::terrain::NoiseTerrain;

        let mut cache = TileCache::new();
        let mut selection = Selection::new();
        let camera = Camera::default();
        let oracle = NoiseTerrain::default();
        let refill = |cache: &mut TileCache, selection: &Selection| {
            cache.recalculate(
                &camera,
                20,
                WindowSize::new(200, 200),
                2,
                15,
                selection.markers(),
                &oracle,
            );
        };
        refill(&mut cache, &selection);

        selection.press(TileCoord::new(1, 1), &mut cache);
        selection.drag_to(&TileCoord::new(3, 3), &mut cache);
        refill(&mut cache, &selection);
        let full = cache.len();

        // Shrinking to 1..=2 drops row 3 and column 3: five tiles change.
        assert!(selection.drag_to(&TileCoord::new(2, 2), &mut cache));
        assert_eq!(cache.len(), full - 5);
        for coord in block(1..=2, 1..=2) {
            assert!(cache.contains(&coord), "{coord} should stay cached");
        }

        // Same tile again: nothing to evict.
        refill(&mut cache, &selection);
        assert!(!selection.drag_to(&TileCoord::new(2, 2), &mut cache));
        assert_eq!(cache.len(), full);
    }

    #[test]
    fn release_when_idle_is_a_noop() {
        let mut cache = TileCache::new();
        let mut selection = Selection::new();
        assert_eq!(selection.release(&mut cache), 0);
        assert!(!selection.drag_to(&TileCoord::new(1, 1), &mut cache));
    }
}
