//! Document-space to target-local coordinate translation.
//!
//! Raw events report positions in document ("page") space. Consumers want
//! positions relative to the target surface's origin and clamped to its
//! bounds, even while capture delivers positions from outside the surface.

use crate::traits::PointerHost;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Position of one element relative to its offset parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    #[inline]
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Sum an offset chain (target first, then each offset parent up to the
/// document root) into the document-to-target delta.
pub fn compute_delta<I>(chain: I) -> Point
where
    I: IntoIterator<Item = Offset>,
{
    chain.into_iter().fold(Point::default(), |acc, link| Point {
        x: acc.x + link.left,
        y: acc.y + link.top,
    })
}

/// Translate a document x coordinate into target space, clamped to `[0, width]`.
#[inline]
pub fn to_local_x(page_x: f32, delta: Point, width: f32) -> f32 {
    clamp_extent(page_x - delta.x, width)
}

/// Translate a document y coordinate into target space, clamped to `[0, height]`.
#[inline]
pub fn to_local_y(page_y: f32, delta: Point, height: f32) -> f32 {
    clamp_extent(page_y - delta.y, height)
}

fn clamp_extent(v: f32, extent: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.min(extent).max(0.0)
}

/// Delta and size of the target surface, captured at the start of an
/// interaction and held fixed until the next Begin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceGeometry {
    pub delta: Point,
    pub size: Size,
}

impl SurfaceGeometry {
    pub fn capture<H: PointerHost + ?Sized>(host: &H) -> Self {
        Self {
            delta: compute_delta(host.offset_chain()),
            size: host.surface_size(),
        }
    }

    #[inline]
    pub fn to_local(&self, page: Point) -> Point {
        Point {
            x: to_local_x(page.x, self.delta, self.size.width),
            y: to_local_y(page.y, self.delta, self.size.height),
        }
    }

    /// Reconstruct document coordinates from target-offset coordinates, for
    /// hosts whose mouse events carry no page position.
    #[inline]
    pub fn to_page(&self, offset: Point) -> Point {
        Point {
            x: offset.x + self.delta.x,
            y: offset.y + self.delta.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider_track() -> SurfaceGeometry {
        SurfaceGeometry {
            delta: Point::new(10.0, 20.0),
            size: Size::new(200.0, 50.0),
        }
    }

    #[test]
    fn delta_sums_every_link() {
        let chain = [
            Offset::new(4.0, 6.0),
            Offset::new(100.0, 0.0),
            Offset::new(8.0, 30.5),
        ];
        assert_eq!(compute_delta(chain), Point::new(112.0, 36.5));
    }

    #[test]
    fn empty_chain_is_document_origin() {
        assert_eq!(compute_delta(Vec::new()), Point::default());
    }

    #[test]
    fn left_of_origin_clamps_to_zero() {
        let local = slider_track().to_local(Point::new(5.0, 25.0));
        assert_eq!(local, Point::new(0.0, 5.0));
    }

    #[test]
    fn beyond_width_clamps_to_width() {
        let local = slider_track().to_local(Point::new(500.0, 25.0));
        assert_eq!(local, Point::new(200.0, 5.0));
    }

    #[test]
    fn beyond_height_clamps_to_height() {
        let local = slider_track().to_local(Point::new(50.0, -400.0));
        assert_eq!(local, Point::new(40.0, 0.0));
        let local = slider_track().to_local(Point::new(50.0, 400.0));
        assert_eq!(local, Point::new(40.0, 50.0));
    }

    #[test]
    fn nan_clamps_to_zero() {
        assert_eq!(to_local_x(f32::NAN, Point::default(), 100.0), 0.0);
    }

    #[test]
    fn page_reconstruction_inverts_translation() {
        let g = slider_track();
        let page = g.to_page(Point::new(30.0, 12.0));
        assert_eq!(page, Point::new(40.0, 32.0));
        assert_eq!(g.to_local(page), Point::new(30.0, 12.0));
    }
}
