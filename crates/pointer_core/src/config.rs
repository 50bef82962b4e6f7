//! Tracker configuration.

use crate::id::PointerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Identity given to reports that carry neither a touch identifier nor a
    /// device pointer id.
    pub mouse_pointer_id: PointerId,
    /// Forward the selected event model to the sink's `on_log` on attach.
    pub log_model_selection: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mouse_pointer_id: PointerId::MOUSE,
            log_model_selection: true,
        }
    }
}
