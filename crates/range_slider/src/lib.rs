//! # range_slider
//!
//! A two-marker range slider built on the unified pointer protocol.
//!
//! - [`RangeSlider`]: marker positions, drag state and committed values; a
//!   [`DrawSink`](pointer_core::DrawSink) so it can be handed straight to a
//!   [`PointerTracker`](pointer_core::PointerTracker)
//! - [`RangeConfig`]: numeric bounds, step and the disabled flag
//! - [`FrameScheduler`]: coalesces drag moves into one update per frame
//!
//! ## Design Principles
//!
//! Nothing here draws. The host asks for a [`TrackLayout`] after every
//! change and renders it however it likes. Pixel positions are always
//! derived from values and the current track width, so a resize only needs
//! [`RangeSlider::resize`].

mod config;
mod frame;
mod slider;

pub use config::{RangeConfig, RangeConfigError, parse_bound, parse_disabled, parse_step};
pub use frame::{FrameRequest, FrameScheduler};
pub use slider::{Commit, Marker, RangeSlider, TrackLayout};
