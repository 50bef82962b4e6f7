use std::time::Duration;

use range_slider::RangeConfig;

/// Window and track settings for the demo host.
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformConfig {
    pub title: String,
    /// Initial logical window size.
    pub window_size: (f64, f64),
    /// Horizontal gap between the window edge and the track, logical px.
    pub track_margin: f32,
    pub track_height: f32,
    /// How often the down pointers are logged; `None` disables the audit.
    pub audit_interval: Option<Duration>,
    /// Tick period for flushing coalesced slider updates.
    pub frame_interval: Duration,
    pub range: RangeConfig,
    /// Starting `(min_value, max_value)`; the bounds when `None`.
    pub initial_values: Option<(f64, f64)>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "ranger".to_string(),
            window_size: (640.0, 160.0),
            track_margin: 40.0,
            track_height: 24.0,
            audit_interval: Some(Duration::from_secs(1)),
            frame_interval: Duration::from_millis(16), // ~60Hz
            range: RangeConfig::default(),
            initial_values: None,
        }
    }
}
