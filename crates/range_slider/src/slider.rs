//! Marker positions, drag handling and value commits.

use pointer_core::{DrawSink, PointerId, SurfaceId};

use crate::config::{RangeConfig, RangeConfigError, check_bounds, parse_step};
use crate::frame::FrameScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Min,
    Max,
}

impl Marker {
    #[inline]
    fn index(self) -> usize {
        match self {
            Marker::Min => 0,
            Marker::Max => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::Min => "min",
            Marker::Max => "max",
        }
    }
}

/// Pixel geometry for rendering, all measured from the track's left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackLayout {
    pub width: f64,
    pub min_left: f64,
    pub max_left: f64,
    /// Left edge of the fill between the markers.
    pub fill_left: f64,
    /// Distance from the fill's right edge to the track's right edge.
    pub fill_right: f64,
}

/// A value written back when a drag ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Commit {
    pub marker: Marker,
    pub value: f64,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    marker: Marker,
    pointer: PointerId,
    /// Latest target-local x reported for the drag, not yet validated.
    move_x: f64,
}

#[derive(Debug)]
pub struct RangeSlider {
    config: RangeConfig,
    width: f64,
    values: [f64; 2],
    positions: [f64; 2],
    labels: [Option<f64>; 2],
    focused: Option<Marker>,
    drag: Option<Drag>,
    frames: FrameScheduler,
    committed: Option<Commit>,
}

impl RangeSlider {
    /// Markers start at the bounds.
    pub fn new(config: RangeConfig, width: f64) -> Self {
        let mut slider = Self {
            config,
            width: width.max(0.0),
            values: [config.min, config.max],
            positions: [0.0; 2],
            labels: [None; 2],
            focused: None,
            drag: None,
            frames: FrameScheduler::new(),
            committed: None,
        };
        slider.update_limits();
        slider
    }

    pub fn with_values(mut self, min_value: f64, max_value: f64) -> Self {
        self.set_values(min_value, max_value);
        self
    }

    #[inline]
    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Committed `(min_value, max_value)`.
    #[inline]
    pub fn values(&self) -> (f64, f64) {
        (self.values[0], self.values[1])
    }

    #[inline]
    pub fn position(&self, marker: Marker) -> f64 {
        self.positions[marker.index()]
    }

    /// Live nearest-step value shown on the marker while it is dragged, then
    /// the committed value. `None` until the marker is first touched.
    #[inline]
    pub fn marker_label(&self, marker: Marker) -> Option<f64> {
        self.labels[marker.index()]
    }

    #[inline]
    pub fn focused(&self) -> Option<Marker> {
        self.focused
    }

    pub fn dragging(&self) -> Option<Marker> {
        self.drag.map(|d| d.marker)
    }

    #[inline]
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn layout(&self) -> TrackLayout {
        let [min_left, max_left] = self.positions;
        TrackLayout {
            width: self.width,
            min_left,
            max_left,
            fill_left: min_left,
            fill_right: self.width - max_left,
        }
    }

    /// The marker nearer to `x`. On a tie the min marker wins only when `x`
    /// lies left of it.
    pub fn closest_marker(&self, x: f64) -> Marker {
        let [min_x, max_x] = self.positions;
        let from_min = (x - min_x).abs();
        let from_max = (x - max_x).abs();
        if from_min == from_max {
            return if x < min_x { Marker::Min } else { Marker::Max };
        }
        if from_min < from_max {
            Marker::Min
        } else {
            Marker::Max
        }
    }

    /// New track width; marker pixels are re-derived from the values.
    pub fn resize(&mut self, width: f64) {
        self.width = width.max(0.0);
        self.update_limits();
    }

    pub fn set_bounds(&mut self, min: f64, max: f64) -> Result<(), RangeConfigError> {
        check_bounds(min, max)?;
        self.config.min = min;
        self.config.max = max;
        self.update_limits();
        Ok(())
    }

    /// Invalid steps fall back to `1`, like the step attribute.
    pub fn set_step(&mut self, step: f64) {
        self.config.step = if step.is_finite() && step > 0.0 {
            step
        } else {
            parse_step(None)
        };
    }

    /// Disabling mid-drag abandons the drag without committing.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled && let Some(drag) = self.drag.take() {
            log::debug!(
                target: "range_slider",
                "disabled while dragging {} marker; drag abandoned",
                drag.marker.name()
            );
            self.focused = None;
            self.frames.cancel();
        }
    }

    pub fn set_values(&mut self, min_value: f64, max_value: f64) {
        self.values = [min_value, max_value];
        self.update_limits();
    }

    /// Apply the coalesced drag update, if a frame was requested. Returns
    /// whether anything changed.
    pub fn run_frame(&mut self) -> bool {
        if self.frames.take().is_none() {
            return false;
        }
        self.update_position_with_x();
        true
    }

    /// The most recent commit, handed out once.
    pub fn take_committed(&mut self) -> Option<Commit> {
        self.committed.take()
    }

    fn update_limits(&mut self) {
        self.positions = [
            self.px_for_value(self.values[0]),
            self.px_for_value(self.values[1]),
        ];
    }

    fn px_for_value(&self, value: f64) -> f64 {
        let span = self.config.span();
        if span == 0.0 {
            return 0.0;
        }
        let px = (value - self.config.min).abs() / span * self.width;
        px.clamp(0.0, self.width)
    }

    fn value_at(&self, x: f64) -> f64 {
        let fraction = if self.width > 0.0 { x / self.width } else { 0.0 };
        self.config.min + fraction * (self.config.max - self.config.min)
    }

    /// Snaps to multiples of the step, counted from zero.
    fn nearest_step(&self, x: f64) -> f64 {
        let step = self.config.step;
        (self.value_at(x) / step).round() * step
    }

    /// A marker may not pass the other marker or leave the track.
    fn valid_x(&self, marker: Marker, x: f64) -> f64 {
        match marker {
            Marker::Min => x.min(self.positions[Marker::Max.index()]).max(0.0),
            Marker::Max => x.max(self.positions[Marker::Min.index()]).min(self.width),
        }
    }

    /// Snapping can round a value past the other marker's value. Pull it
    /// back to the last step on this marker's side, or onto the other
    /// marker when no such step lies within the bounds.
    fn valid_value(&self, marker: Marker, value: f64) -> f64 {
        let other = match marker {
            Marker::Min => self.values[Marker::Max.index()],
            Marker::Max => self.values[Marker::Min.index()],
        };
        let lo = self.config.min.min(self.config.max);
        let hi = self.config.min.max(self.config.max);
        let step = self.config.step;
        // Values grow left to right unless the range is reversed.
        let stays_below = (marker == Marker::Min) == (self.config.max >= self.config.min);
        if stays_below && value > other {
            let aligned = (other / step).floor() * step;
            if aligned >= lo { aligned } else { other }
        } else if !stays_below && value < other {
            let aligned = (other / step).ceil() * step;
            if aligned <= hi { aligned } else { other }
        } else {
            value
        }
    }

    fn update_position_with_x(&mut self) {
        let Some(drag) = self.drag else {
            return;
        };
        let x = self.valid_x(drag.marker, drag.move_x);
        let i = drag.marker.index();
        self.positions[i] = x;
        self.labels[i] = Some(self.valid_value(drag.marker, self.nearest_step(x)));
    }

    fn snap_and_commit(&mut self, drag: Drag) {
        let x = self.valid_x(drag.marker, drag.move_x);
        let lo = self.config.min.min(self.config.max);
        let hi = self.config.min.max(self.config.max);
        let value = self.valid_value(drag.marker, self.nearest_step(x).clamp(lo, hi));
        let i = drag.marker.index();
        self.values[i] = value;
        self.positions[i] = self.px_for_value(value);
        self.labels[i] = Some(value);
        self.committed = Some(Commit {
            marker: drag.marker,
            value,
        });
        log::info!(
            target: "range_slider",
            "{} value committed: {value}",
            drag.marker.name()
        );
    }

    fn drag_for(&self, id: PointerId) -> Option<Drag> {
        self.drag.filter(|d| d.pointer == id)
    }
}

impl DrawSink for RangeSlider {
    fn on_begin(&mut self, _surface: SurfaceId, id: PointerId, x: f32, _y: f32) {
        if self.config.disabled {
            return;
        }
        let x = f64::from(x);
        let marker = self.closest_marker(x);
        if let Some(prev) = self.drag {
            log::debug!(
                target: "range_slider",
                "pointer {id} takes over the {} marker drag from pointer {}",
                marker.name(),
                prev.pointer
            );
        }
        log::debug!(target: "range_slider", "pointer {id} grabs {} marker at {x}", marker.name());
        self.focused = Some(marker);
        self.drag = Some(Drag {
            marker,
            pointer: id,
            move_x: x,
        });
        self.frames.cancel();
        self.update_position_with_x();
    }

    fn on_extend(&mut self, _surface: SurfaceId, id: PointerId, x: f32, _y: f32) {
        if self.config.disabled {
            return;
        }
        let Some(mut drag) = self.drag_for(id) else {
            return;
        };
        drag.move_x = f64::from(x);
        self.drag = Some(drag);
        self.frames.request();
    }

    fn on_end(&mut self, _surface: SurfaceId, id: PointerId) {
        if self.config.disabled {
            return;
        }
        let Some(drag) = self.drag_for(id) else {
            return;
        };
        self.drag = None;
        self.focused = None;
        self.snap_and_commit(drag);
        self.frames.cancel();
    }

    fn on_log(&mut self, message: &str) {
        log::info!(target: "range_slider", "{message}");
    }
}
