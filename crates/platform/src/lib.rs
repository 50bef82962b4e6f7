//! Winit host for the range slider.
//!
//! The window stands in for the document, a centred track for the target
//! element. Window events are translated into raw pointer events, routed
//! through the listeners the tracker installed, and fed to the tracker.

mod app;
mod config;
mod error;
mod surface;
mod translate;

use range_slider::RangeConfig;
use winit::event_loop::EventLoop;

use crate::app::{RangerApp, UserEvent};

pub use config::PlatformConfig;
pub use error::PlatformError;
pub use surface::{TrackRect, WinitSurface};
pub use translate::EventTranslator;

pub fn run() -> Result<(), PlatformError> {
    run_with_config(PlatformConfig::default())
}

pub fn run_with_config(config: PlatformConfig) -> Result<(), PlatformError> {
    // Configs built by hand skip `RangeConfig::new`; check them here.
    let range = config.range;
    RangeConfig::new(range.min, range.max, range.step)?;

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();
    let mut app = RangerApp::new(config, proxy);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
