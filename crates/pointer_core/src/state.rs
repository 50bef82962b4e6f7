//! Per-pointer state held by the tracker.

use crate::event::DeviceFamily;
use crate::geometry::Point;

/// Last observed document-space position of a pointer that is down.
///
/// An entry exists in the tracker's map iff the pointer is between Begin and
/// End; there is no separate "down" flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerState {
    pub last: Point,
    /// Family of the Begin that created this entry; decides which capture
    /// the matching End releases.
    pub family: DeviceFamily,
}

impl PointerState {
    #[inline]
    pub fn new(page: Point, family: DeviceFamily) -> Self {
        Self { last: page, family }
    }

    /// Record `page` and report whether it differs from the previous sample.
    #[inline]
    pub fn advance(&mut self, page: Point) -> bool {
        if self.last == page {
            return false;
        }
        self.last = page;
        true
    }
}
