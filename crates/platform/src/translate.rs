//! Winit window events to raw pointer events.
//!
//! Positions are converted to logical pixels so they line up with the
//! logical track rectangle regardless of the display's scale factor.

use pointer_core::{RawEvent, RawEventKind};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// Touch ids are passed through as pointer identities unchanged. A contact
/// numbered `1` therefore shares an identity with the mouse, and a finger
/// landing during a mouse drag restarts that drag.
#[derive(Debug)]
pub struct EventTranslator {
    scale_factor: f64,
    /// Mouse button events carry no position; winit reports it separately.
    cursor: (f32, f32),
}

impl EventTranslator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: (0.0, 0.0),
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<RawEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::Touch(touch) => Some(self.touch(touch.phase, touch.location, touch.id)),
            _ => None,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> RawEvent {
        self.cursor = self.logical(position);
        RawEvent::mouse(RawEventKind::MouseMove, self.cursor.0, self.cursor.1)
    }

    /// Only the primary button drives the slider.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<RawEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let kind = match state {
            ElementState::Pressed => RawEventKind::MouseDown,
            ElementState::Released => RawEventKind::MouseUp,
        };
        Some(RawEvent::mouse(kind, self.cursor.0, self.cursor.1))
    }

    pub fn touch(&mut self, phase: TouchPhase, location: PhysicalPosition<f64>, id: u64) -> RawEvent {
        let kind = match phase {
            TouchPhase::Started => RawEventKind::TouchStart,
            TouchPhase::Moved => RawEventKind::TouchMove,
            TouchPhase::Ended => RawEventKind::TouchEnd,
            TouchPhase::Cancelled => RawEventKind::TouchCancel,
        };
        let (x, y) = self.logical(location);
        RawEvent::touches(kind, &[(id, x, y)])
    }

    fn logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let p = position.to_logical::<f64>(self.scale_factor);
        (p.x as f32, p.y as f32)
    }
}
