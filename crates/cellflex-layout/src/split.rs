// ABOUTME: Split layout engine with draggable dividers.
// ABOUTME: Places dividers, clips them to pane minimums, rescales on resize, and runs drag sessions.

use cellflex_core::{Axis, Size, SplitSettings};

use crate::drag::DragState;
use crate::{LayoutError, WidgetId};

/// Requested divider position along the split axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Px(f64),
    /// Fraction of the container length
    Fraction(f64),
}

impl Offset {
    /// Values below 1 are fractions, anything else pixels
    pub fn from_raw(t: f64) -> Self {
        if t < 1.0 {
            Offset::Fraction(t)
        } else {
            Offset::Px(t)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Divider {
    /// Centre position in pixels from the container start
    pub t: f64,
    /// `t` relative to the container length, kept for resizing
    pub fraction: f64,
    /// Rendered start edge (`t - half width`)
    pub offset: f64,
}

/// A pane and its current extent along the split axis
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPane {
    pub id: WidgetId,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub start: f64,
    pub extent: f64,
}

/// The lightweight marker that follows the pointer during a drag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Indicator {
    pub t: f64,
    pub offset: f64,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct SplitLayout {
    axis: Axis,
    settings: SplitSettings,
    panes: Vec<SplitPane>,
    dividers: Vec<Divider>,
    indicator: Indicator,
    drag: DragState,
    /// Client coordinate of the container start along the axis
    origin: f64,
    /// Container content length along the axis
    length: f64,
    transition: bool,
}

impl SplitLayout {
    pub fn new(axis: Axis, settings: SplitSettings) -> Self {
        Self {
            axis,
            settings,
            panes: Vec::new(),
            dividers: Vec::new(),
            indicator: Indicator::default(),
            drag: DragState::default(),
            origin: 0.0,
            length: 0.0,
            transition: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn panes(&self) -> &[SplitPane] {
        &self.panes
    }

    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition
    }

    fn min_along(&self, pane: &SplitPane) -> f64 {
        let declared = match self.axis {
            Axis::Horizontal => pane.min_width,
            Axis::Vertical => pane.min_height,
        };
        self.settings.min_extent(declared)
    }

    /// Current span of every pane, dividers included
    fn spans(&self) -> Vec<f64> {
        match self.panes.len() {
            0 => Vec::new(),
            1 => vec![self.length],
            _ => {
                let mut prev = 0.0;
                let mut spans: Vec<f64> = self
                    .dividers
                    .iter()
                    .map(|d| {
                        let span = d.t - prev;
                        prev = d.t;
                        span
                    })
                    .collect();
                spans.push(self.length - prev);
                spans
            }
        }
    }

    /// Insert a pane at `index`, giving it `length / panes` and shrinking the
    /// other panes proportionally.
    pub fn insert_pane(
        &mut self,
        id: WidgetId,
        index: usize,
        min_width: Option<f64>,
        min_height: Option<f64>,
    ) -> Result<(), LayoutError> {
        let len = self.panes.len();
        if index > len {
            return Err(LayoutError::IndexOutOfRange { index, len });
        }

        let old_spans = self.spans();
        self.panes.insert(
            index,
            SplitPane {
                id,
                min_width,
                min_height,
                start: 0.0,
                extent: 0.0,
            },
        );
        self.drag.pane_inserted(index);
        let n = self.panes.len();
        if n == 1 {
            self.panes[0].extent = self.length;
            return Ok(());
        }

        self.dividers.push(Divider::default());
        let need = self.length / n as f64;
        let left = self.length - need;
        let mut spans: Vec<f64> = old_spans
            .iter()
            .map(|s| if self.length > 0.0 { s * left / self.length } else { 0.0 })
            .collect();
        spans.insert(index, need);

        let mut t = 0.0;
        for (i, divider) in self.dividers.iter_mut().enumerate() {
            t += spans[i];
            divider.t = t;
            // Only survives while the container has no size yet
            divider.fraction = (i + 1) as f64 / n as f64;
        }
        if self.length > 0.0 {
            for i in 0..self.dividers.len() {
                let target = self.dividers[i].t;
                self.place(i, target);
            }
        }
        tracing::debug!("Inserted pane {} at {} ({} panes)", id, index, n);
        Ok(())
    }

    /// Update a pane's declared minimum size
    pub fn set_pane_min(&mut self, id: WidgetId, min_width: Option<f64>, min_height: Option<f64>) {
        if let Some(pane) = self.panes.iter_mut().find(|p| p.id == id) {
            pane.min_width = min_width;
            pane.min_height = min_height;
        }
    }

    /// Move divider `i`, clipped to its legal range. Returns the final position.
    pub fn move_divider(&mut self, i: usize, offset: Offset) -> Result<f64, LayoutError> {
        let count = self.dividers.len();
        if i >= count {
            return Err(LayoutError::DividerOutOfRange { index: i, count });
        }
        let t = match offset {
            Offset::Px(t) => t,
            Offset::Fraction(f) => f * self.length,
        };
        Ok(self.place(i, t))
    }

    fn place(&mut self, i: usize, t: f64) -> f64 {
        let t = self.clip(i, t);
        let half = self.settings.divider_half_width;
        let count = self.dividers.len();

        let fraction = if self.length > 0.0 {
            t / self.length
        } else {
            self.dividers[i].fraction
        };
        self.dividers[i] = Divider {
            t,
            fraction,
            offset: t - half,
        };
        self.indicator.t = t;
        self.indicator.offset = t - half;

        let begin = if i > 0 { self.dividers[i - 1].t + half } else { 0.0 };
        let end = if i + 1 < count {
            self.dividers[i + 1].t - half
        } else {
            self.length
        };
        let left = &mut self.panes[i];
        left.start = begin;
        left.extent = (t - begin - half).max(0.0);
        let right = &mut self.panes[i + 1];
        right.start = t + half;
        right.extent = (end - t - half).max(0.0);
        t
    }

    /// Clip `t` between the neighbouring dividers (or container edges),
    /// keeping a divider width plus the pane minimum on either side. When the
    /// range is empty the divider pins at the upper bound.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a divider index.
    pub fn clip(&self, i: usize, t: f64) -> f64 {
        let width = self.settings.divider_width();
        let mut min = if i > 0 { self.dividers[i - 1].t } else { 0.0 };
        let mut max = if i + 1 < self.dividers.len() {
            self.dividers[i + 1].t
        } else {
            self.length
        };
        min += width + self.min_along(&self.panes[i]);
        max -= width + self.min_along(&self.panes[i + 1]);
        if min > max {
            tracing::debug!("Divider {} over-constrained ({:.1} > {:.1}), pinning", i, min, max);
        }
        t.max(min).min(max)
    }

    /// Update the client coordinate pointer events are measured from
    pub fn set_origin(&mut self, origin: f64) {
        self.origin = origin;
    }

    /// Adopt new container bounds and re-place every divider at its fraction
    pub fn on_resize(&mut self, origin: f64, length: f64) {
        self.origin = origin;
        self.length = length;
        self.transition = false;
        if self.panes.len() == 1 {
            let pane = &mut self.panes[0];
            pane.start = 0.0;
            pane.extent = length;
            return;
        }
        // Scale first so each clip sees its neighbours at their new positions
        for divider in &mut self.dividers {
            divider.t = divider.fraction * length;
        }
        for i in 0..self.dividers.len() {
            let target = self.dividers[i].fraction * length;
            self.place(i, target);
        }
    }

    /// Minimum size of the whole splitter derived from its panes
    pub fn own_min_size(&self) -> Size {
        let width = self.settings.divider_width();
        let base = self.settings.own_min_size_base;
        let (mut w, mut h) = (base, base);
        for pane in &self.panes {
            w += width + self.settings.min_extent(pane.min_width);
            h += width + self.settings.min_extent(pane.min_height);
        }
        Size::new(w, h)
    }

    /// Capture divider `i` and snap the indicator to the pointer.
    /// Returns false if a drag is already running.
    pub fn pointer_down(&mut self, i: usize, pointer: f64) -> Result<bool, LayoutError> {
        let count = self.dividers.len();
        if i >= count {
            return Err(LayoutError::DividerOutOfRange { index: i, count });
        }
        if !self.drag.begin(i) {
            return Ok(false);
        }
        self.transition = true;
        let t = self.clip(i, pointer - self.origin);
        self.indicator = Indicator {
            t,
            offset: t - self.settings.divider_half_width,
            visible: true,
        };
        tracing::debug!("Drag started on divider {}", i);
        Ok(true)
    }

    /// Move the indicator while dragging; panes stay put until release
    pub fn pointer_move(&mut self, pointer: f64) -> bool {
        let Some(i) = self.drag.captured() else {
            return false;
        };
        let t = self.clip(i, pointer - self.origin);
        self.indicator.t = t;
        self.indicator.offset = t - self.settings.divider_half_width;
        true
    }

    /// Commit the dragged divider at the pointer and end the session
    pub fn pointer_up(&mut self, pointer: f64) -> bool {
        let Some(i) = self.drag.end() else {
            return false;
        };
        self.indicator.visible = false;
        let t = self.clip(i, pointer - self.origin);
        let t = self.place(i, t);
        tracing::info!("Divider {} committed at {:.1}px", i, t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(length: f64, panes: usize) -> SplitLayout {
        let mut layout = SplitLayout::new(Axis::Horizontal, SplitSettings::default());
        layout.on_resize(0.0, length);
        for i in 0..panes {
            layout.insert_pane(WidgetId(i as u32), i, None, None).unwrap();
        }
        layout
    }

    fn positions(layout: &SplitLayout) -> Vec<f64> {
        layout.dividers().iter().map(|d| d.t).collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn single_pane_fills_container() {
        let layout = split(600.0, 1);
        assert!(layout.dividers().is_empty());
        assert_eq!(layout.panes()[0].extent, 600.0);
    }

    #[test]
    fn fourth_pane_gets_equal_share() {
        let mut layout = split(600.0, 3);
        for (t, expected) in positions(&layout).into_iter().zip([200.0, 400.0]) {
            assert_close(t, expected);
        }

        layout.insert_pane(WidgetId(3), 3, None, None).unwrap();
        for (t, expected) in positions(&layout).into_iter().zip([150.0, 300.0, 450.0]) {
            assert_close(t, expected);
        }
        let extents: Vec<f64> = layout.panes().iter().map(|p| p.extent).collect();
        assert_eq!(extents, vec![147.0, 144.0, 144.0, 147.0]);
        assert_eq!(layout.panes()[3].start, 453.0);
        assert_eq!(layout.dividers()[1].offset, 297.0);
    }

    #[test]
    fn insert_shrinks_existing_panes_proportionally() {
        let mut layout = split(600.0, 2);
        layout.move_divider(0, Offset::Px(200.0)).unwrap();

        layout.insert_pane(WidgetId(9), 0, None, None).unwrap();
        assert_eq!(layout.panes()[0].id, WidgetId(9));
        let t = positions(&layout);
        assert_close(t[0], 200.0);
        assert_close(t[1], 200.0 + 200.0 * 400.0 / 600.0);
    }

    #[test]
    fn insert_index_out_of_range_is_rejected() {
        let mut layout = split(600.0, 2);
        let err = layout.insert_pane(WidgetId(5), 3, None, None).unwrap_err();
        assert!(matches!(err, LayoutError::IndexOutOfRange { index: 3, len: 2 }));
        assert_eq!(layout.panes().len(), 2);
    }

    #[test]
    fn raw_offsets_below_one_are_fractions() {
        assert_eq!(Offset::from_raw(0.25), Offset::Fraction(0.25));
        assert_eq!(Offset::from_raw(250.0), Offset::Px(250.0));

        let mut layout = split(800.0, 2);
        let t = layout.move_divider(0, Offset::from_raw(0.25)).unwrap();
        assert_eq!(t, 200.0);
        assert_eq!(layout.dividers()[0].fraction, 0.25);
    }

    #[test]
    fn divider_index_out_of_range_is_rejected() {
        let mut layout = split(600.0, 2);
        assert!(matches!(
            layout.move_divider(1, Offset::Px(10.0)),
            Err(LayoutError::DividerOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn clip_respects_neighbours_and_minimums() {
        let mut layout = SplitLayout::new(Axis::Horizontal, SplitSettings::default());
        layout.on_resize(0.0, 600.0);
        layout.insert_pane(WidgetId(0), 0, Some(100.0), None).unwrap();
        layout.insert_pane(WidgetId(1), 1, None, None).unwrap();
        layout.insert_pane(WidgetId(2), 2, Some(50.0), None).unwrap();

        // left bound: 0 + 6 + 100
        assert_eq!(layout.move_divider(0, Offset::Px(10.0)).unwrap(), 106.0);
        // right bound: 600 - 6 - 50
        assert_eq!(layout.move_divider(1, Offset::Px(590.0)).unwrap(), 544.0);
        // divider 0 cannot pass divider 1 minus clearance and the fallback minimum
        assert_eq!(layout.move_divider(0, Offset::Px(590.0)).unwrap(), 544.0 - 26.0);
    }

    #[test]
    fn over_constrained_divider_pins_at_max() {
        let mut layout = SplitLayout::new(Axis::Horizontal, SplitSettings::default());
        layout.on_resize(0.0, 100.0);
        layout.insert_pane(WidgetId(0), 0, Some(80.0), None).unwrap();
        layout.insert_pane(WidgetId(1), 1, Some(80.0), None).unwrap();

        let t = layout.move_divider(0, Offset::Px(50.0)).unwrap();
        assert_eq!(t, 100.0 - 6.0 - 80.0);
        assert!(layout.panes().iter().all(|p| p.extent >= 0.0));
    }

    #[test]
    fn dividers_stay_ordered_under_arbitrary_moves() {
        let mut layout = split(900.0, 5);
        let clearance = SplitSettings::default().divider_width();
        let mut seed: u64 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let i = (seed >> 33) as usize % 4;
            let t = ((seed >> 11) % 1200) as f64 - 150.0;
            layout.move_divider(i, Offset::Px(t.max(1.0))).unwrap();

            let t = positions(&layout);
            assert!(t[0] >= clearance);
            for pair in t.windows(2) {
                assert!(pair[1] - pair[0] >= clearance, "{:?}", t);
            }
            assert!(t[3] <= 900.0 - clearance);
            let total: f64 = layout.panes().iter().map(|p| p.extent).sum();
            assert_close(total, 900.0 - 4.0 * clearance);
        }
    }

    #[test]
    fn resize_preserves_fractions() {
        let mut layout = split(600.0, 3);
        layout.move_divider(0, Offset::Fraction(0.25)).unwrap();
        layout.on_resize(0.0, 1000.0);
        assert_close(layout.dividers()[0].t, 250.0);
        assert_close(layout.dividers()[1].t, 1000.0 * 400.0 / 600.0);
        assert_eq!(layout.panes()[2].start, layout.dividers()[1].t + 3.0);

        layout.on_resize(0.0, 600.0);
        assert_close(layout.dividers()[0].t, 150.0);
    }

    #[test]
    fn panes_inserted_before_sizing_split_evenly_later() {
        let mut layout = SplitLayout::new(Axis::Vertical, SplitSettings::default());
        for i in 0..3 {
            layout.insert_pane(WidgetId(i), i as usize, None, None).unwrap();
        }
        layout.on_resize(0.0, 300.0);
        let t = positions(&layout);
        assert_close(t[0], 100.0);
        assert_close(t[1], 200.0);
    }

    #[test]
    fn drag_moves_indicator_until_release() {
        let mut layout = split(600.0, 2);
        layout.on_resize(100.0, 600.0);
        assert!(!layout.pointer_move(250.0));

        assert!(layout.pointer_down(0, 400.0).unwrap());
        assert!(layout.is_transitioning());
        assert_eq!(layout.drag_state(), DragState::Dragging { divider: 0 });
        assert!(layout.indicator().visible);
        assert_eq!(layout.indicator().t, 300.0);

        assert!(layout.pointer_move(250.0));
        assert_eq!(layout.indicator().t, 150.0);
        assert_eq!(layout.indicator().offset, 147.0);
        // panes are untouched mid-drag
        assert_eq!(layout.dividers()[0].t, 300.0);

        // far past the end, clipped to 600 - 6 - 20
        assert!(layout.pointer_move(5000.0));
        assert_eq!(layout.indicator().t, 574.0);

        assert!(layout.pointer_up(350.0));
        assert_eq!(layout.drag_state(), DragState::Idle);
        assert!(!layout.indicator().visible);
        assert_eq!(layout.dividers()[0].t, 250.0);
        assert_eq!(layout.panes()[0].extent, 247.0);
        assert!(!layout.pointer_up(350.0));
    }

    #[test]
    fn second_pointer_down_is_ignored() {
        let mut layout = split(600.0, 3);
        assert!(layout.pointer_down(0, 100.0).unwrap());
        assert!(!layout.pointer_down(1, 500.0).unwrap());
        assert_eq!(layout.drag_state(), DragState::Dragging { divider: 0 });
    }

    #[test]
    fn drag_survives_pane_insertion() {
        let mut layout = split(600.0, 3);
        assert!(layout.pointer_down(1, 400.0).unwrap());

        // the held boundary between panes 1 and 2 becomes divider 2
        layout.insert_pane(WidgetId(7), 0, None, None).unwrap();
        assert_eq!(layout.drag_state(), DragState::Dragging { divider: 2 });
        assert!(layout.pointer_move(500.0));
        assert_eq!(layout.indicator().t, 500.0);

        assert!(layout.pointer_up(500.0));
        let t = positions(&layout);
        assert_close(t[0], 150.0);
        assert_close(t[1], 300.0);
        assert_close(t[2], 500.0);
        assert_eq!(layout.panes()[2].id, WidgetId(1));
        assert_close(layout.panes()[2].extent, 194.0);
    }

    #[test]
    fn own_min_size_sums_pane_minimums() {
        let mut layout = SplitLayout::new(Axis::Horizontal, SplitSettings::default());
        layout.insert_pane(WidgetId(0), 0, Some(30.0), Some(10.0)).unwrap();
        layout.insert_pane(WidgetId(1), 1, None, None).unwrap();
        layout.insert_pane(WidgetId(2), 2, Some(0.0), Some(0.0)).unwrap();
        let size = layout.own_min_size();
        assert_eq!(size.width, 50.0 + 36.0 + 26.0 + 6.0);
        assert_eq!(size.height, 50.0 + 16.0 + 26.0 + 6.0);
    }
}
