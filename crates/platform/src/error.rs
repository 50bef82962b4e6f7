use std::fmt;

use range_slider::RangeConfigError;
use winit::error::{EventLoopError, OsError};

#[derive(Debug)]
pub enum PlatformError {
    EventLoop(EventLoopError),
    CreateWindow(OsError),
    InvalidRange(RangeConfigError),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::EventLoop(err) => write!(f, "event loop failed: {err}"),
            PlatformError::CreateWindow(err) => write!(f, "failed to create window: {err}"),
            PlatformError::InvalidRange(err) => write!(f, "invalid slider range: {err}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::EventLoop(err) => Some(err),
            PlatformError::CreateWindow(err) => Some(err),
            PlatformError::InvalidRange(err) => Some(err),
        }
    }
}

impl From<EventLoopError> for PlatformError {
    fn from(err: EventLoopError) -> Self {
        PlatformError::EventLoop(err)
    }
}

impl From<OsError> for PlatformError {
    fn from(err: OsError) -> Self {
        PlatformError::CreateWindow(err)
    }
}

impl From<RangeConfigError> for PlatformError {
    fn from(err: RangeConfigError) -> Self {
        PlatformError::InvalidRange(err)
    }
}
