//! Raw platform events and their classification.
//!
//! Every platform event name is mapped to a [`RawEventKind`] once, at the
//! boundary. The tracker only ever looks at the derived [`Phase`] and
//! [`DeviceFamily`].

use crate::geometry::{Point, SurfaceGeometry};
use crate::id::PointerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Begin,
    Move,
    End,
    Cancel,
}

impl Phase {
    /// Cancel is handled exactly like End.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::End | Phase::Cancel)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceFamily {
    /// Legacy Microsoft unified pointer events.
    Pointer,
    Touch,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    MsPointerDown,
    MsPointerMove,
    MsPointerUp,
    MsPointerCancel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseDown,
    MouseMove,
    MouseUp,
}

impl RawEventKind {
    pub const ALL: [RawEventKind; 11] = [
        RawEventKind::MsPointerDown,
        RawEventKind::MsPointerMove,
        RawEventKind::MsPointerUp,
        RawEventKind::MsPointerCancel,
        RawEventKind::TouchStart,
        RawEventKind::TouchMove,
        RawEventKind::TouchEnd,
        RawEventKind::TouchCancel,
        RawEventKind::MouseDown,
        RawEventKind::MouseMove,
        RawEventKind::MouseUp,
    ];

    /// Map a platform event name to a kind.
    ///
    /// Accepts the legacy `on`-prefixed registration names (`onmousedown`).
    /// Unknown names return `None`; the host should not forward them.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("on").unwrap_or(name);
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            RawEventKind::MsPointerDown => "MSPointerDown",
            RawEventKind::MsPointerMove => "MSPointerMove",
            RawEventKind::MsPointerUp => "MSPointerUp",
            RawEventKind::MsPointerCancel => "MSPointerCancel",
            RawEventKind::TouchStart => "touchstart",
            RawEventKind::TouchMove => "touchmove",
            RawEventKind::TouchEnd => "touchend",
            RawEventKind::TouchCancel => "touchcancel",
            RawEventKind::MouseDown => "mousedown",
            RawEventKind::MouseMove => "mousemove",
            RawEventKind::MouseUp => "mouseup",
        }
    }

    pub const fn phase(self) -> Phase {
        match self {
            RawEventKind::MsPointerDown | RawEventKind::TouchStart | RawEventKind::MouseDown => {
                Phase::Begin
            }
            RawEventKind::MsPointerMove | RawEventKind::TouchMove | RawEventKind::MouseMove => {
                Phase::Move
            }
            RawEventKind::MsPointerUp | RawEventKind::TouchEnd | RawEventKind::MouseUp => {
                Phase::End
            }
            RawEventKind::MsPointerCancel | RawEventKind::TouchCancel => Phase::Cancel,
        }
    }

    pub const fn family(self) -> DeviceFamily {
        match self {
            RawEventKind::MsPointerDown
            | RawEventKind::MsPointerMove
            | RawEventKind::MsPointerUp
            | RawEventKind::MsPointerCancel => DeviceFamily::Pointer,
            RawEventKind::TouchStart
            | RawEventKind::TouchMove
            | RawEventKind::TouchEnd
            | RawEventKind::TouchCancel => DeviceFamily::Touch,
            RawEventKind::MouseDown | RawEventKind::MouseMove | RawEventKind::MouseUp => {
                DeviceFamily::Mouse
            }
        }
    }
}

/// Where a report's coordinates are measured from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Document ("page") coordinates.
    Page(Point),
    /// Coordinates relative to the target surface. Old mouse events carry
    /// only these; page coordinates are rebuilt from the cached delta.
    TargetOffset(Point),
}

impl Position {
    #[inline]
    pub fn to_page(self, geometry: &SurfaceGeometry) -> Point {
        match self {
            Position::Page(p) => p,
            Position::TargetOffset(p) => geometry.to_page(p),
        }
    }
}

/// One logical pointer inside a raw event: the event itself for mouse and
/// unified pointer events, or one changed contact for touch events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerReport {
    /// Multi-touch contact index.
    pub identifier: Option<u64>,
    /// Device-assigned unified pointer id.
    pub pointer_id: Option<u64>,
    pub position: Position,
}

impl PointerReport {
    pub fn mouse(page: Point) -> Self {
        Self {
            identifier: None,
            pointer_id: None,
            position: Position::Page(page),
        }
    }

    pub fn touch(identifier: u64, page: Point) -> Self {
        Self {
            identifier: Some(identifier),
            pointer_id: None,
            position: Position::Page(page),
        }
    }

    pub fn pointer(pointer_id: u64, page: Point) -> Self {
        Self {
            identifier: None,
            pointer_id: Some(pointer_id),
            position: Position::Page(page),
        }
    }

    /// Touch identifier, then device pointer id, then `fallback`.
    #[inline]
    pub fn resolve_id(&self, fallback: PointerId) -> PointerId {
        self.identifier
            .or(self.pointer_id)
            .map(PointerId::from_raw)
            .unwrap_or(fallback)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    pub reports: Vec<PointerReport>,
}

impl RawEvent {
    pub fn new(kind: RawEventKind, reports: Vec<PointerReport>) -> Self {
        Self { kind, reports }
    }

    pub fn mouse(kind: RawEventKind, x: f32, y: f32) -> Self {
        Self::new(kind, vec![PointerReport::mouse(Point::new(x, y))])
    }

    pub fn pointer(kind: RawEventKind, pointer_id: u64, x: f32, y: f32) -> Self {
        Self::new(kind, vec![PointerReport::pointer(pointer_id, Point::new(x, y))])
    }

    /// A touch event carrying its changed contacts as `(identifier, x, y)`.
    pub fn touches(kind: RawEventKind, changed: &[(u64, f32, f32)]) -> Self {
        Self::new(
            kind,
            changed
                .iter()
                .map(|&(id, x, y)| PointerReport::touch(id, Point::new(x, y)))
                .collect(),
        )
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.kind.phase()
    }
}

/// What the host should do with the native event after the tracker saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    /// Let the platform run its default handling.
    Ignored,
    /// Suppress default handling: prevent default, prevent manipulation and
    /// compatibility mouse events, and under legacy registration set the
    /// event's return value to false.
    Consumed,
}

impl Handled {
    #[inline]
    pub fn is_consumed(self) -> bool {
        matches!(self, Handled::Consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_classification() {
        for kind in RawEventKind::ALL {
            assert_eq!(RawEventKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn legacy_on_prefix_is_accepted() {
        assert_eq!(
            RawEventKind::from_name("onmousedown"),
            Some(RawEventKind::MouseDown)
        );
        assert_eq!(RawEventKind::from_name("onmouseup"), Some(RawEventKind::MouseUp));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(RawEventKind::from_name("click"), None);
        assert_eq!(RawEventKind::from_name("pointerdown"), None);
        assert_eq!(RawEventKind::from_name(""), None);
    }

    #[test]
    fn phases_cover_begin_move_end_cancel() {
        assert_eq!(RawEventKind::TouchStart.phase(), Phase::Begin);
        assert_eq!(RawEventKind::MsPointerMove.phase(), Phase::Move);
        assert_eq!(RawEventKind::MouseUp.phase(), Phase::End);
        assert_eq!(RawEventKind::TouchCancel.phase(), Phase::Cancel);
        assert!(Phase::Cancel.is_terminal());
        assert!(!Phase::Move.is_terminal());
    }

    #[test]
    fn identity_prefers_touch_then_pointer_then_sentinel() {
        let p = Point::new(1.0, 2.0);
        let both = PointerReport {
            identifier: Some(4),
            pointer_id: Some(9),
            position: Position::Page(p),
        };
        assert_eq!(both.resolve_id(PointerId::MOUSE).as_raw(), 4);
        assert_eq!(
            PointerReport::pointer(9, p).resolve_id(PointerId::MOUSE).as_raw(),
            9
        );
        assert_eq!(
            PointerReport::mouse(p).resolve_id(PointerId::MOUSE),
            PointerId::MOUSE
        );
    }

    #[test]
    fn touch_identifier_zero_is_a_real_identity() {
        let report = PointerReport::touch(0, Point::default());
        assert_eq!(report.resolve_id(PointerId::MOUSE).as_raw(), 0);
    }
}
