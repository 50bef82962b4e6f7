//! Opaque identifiers for pointers and target surfaces.
//!
//! Both types wrap a plain `u64` so that hosts can map their own notion of a
//! touch contact, device pointer or DOM element onto them without this crate
//! knowing about any of those systems.

use std::fmt;

/// Identity of one logical pointer (a touch contact, a pen, or the mouse).
///
/// Touch contacts use the host's multi-touch index, unified pointer events use
/// the device-assigned id, and plain mouse events use [`PointerId::MOUSE`]
/// because only one mouse exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(u64);

impl PointerId {
    /// Sentinel identity for the single system mouse.
    pub const MOUSE: PointerId = PointerId(1);

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for PointerId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for PointerId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

impl From<PointerId> for u64 {
    #[inline]
    fn from(id: PointerId) -> Self {
        id.as_raw()
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for the target surface a tracker is attached to.
///
/// Passed back to every consumer callback so one sink can serve several
/// surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}
