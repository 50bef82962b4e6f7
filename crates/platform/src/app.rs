use std::thread;
use std::time::Instant;

use pointer_core::{DrawSink, PointerTracker, SurfaceId};
use range_slider::RangeSlider;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::surface::{TrackRect, WinitSurface};
use crate::translate::EventTranslator;

pub(crate) enum UserEvent {
    Tick,
}

type SliderTracker = PointerTracker<WinitSurface, RangeSlider>;

pub(crate) struct RangerApp {
    config: PlatformConfig,
    window: Option<Window>,
    tracker: Option<SliderTracker>,
    translator: EventTranslator,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    last_audit: Instant,
    error: Option<PlatformError>,
}

impl RangerApp {
    pub(crate) fn new(config: PlatformConfig, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            config,
            window: None,
            tracker: None,
            translator: EventTranslator::new(1.0),
            proxy: Some(proxy),
            ticker_started: false,
            last_audit: Instant::now(),
            error: None,
        }
    }

    pub(crate) fn take_error(&mut self) -> Option<PlatformError> {
        self.error.take()
    }

    fn track_rect(&self, window: &Window) -> TrackRect {
        let size: LogicalSize<f32> = window.inner_size().to_logical(window.scale_factor());
        TrackRect::centered(
            (size.width, size.height),
            self.config.track_margin,
            self.config.track_height,
        )
    }

    fn attach(&mut self, window: &Window) {
        let track = self.track_rect(window);
        let mut slider = RangeSlider::new(self.config.range, f64::from(track.width));
        if let Some((min_value, max_value)) = self.config.initial_values {
            slider.set_values(min_value, max_value);
        }
        let surface = WinitSurface::new(SurfaceId::from_raw(u64::from(window.id())), track);
        self.tracker = Some(PointerTracker::attach(surface, slider));
        log::debug!(target: "platform", "track attached at {track:?}");
    }

    fn relayout(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let track = self.track_rect(window);
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        // The cached geometry is only valid while the track stays put.
        if tracker.active_count() > 0 {
            log::debug!(target: "platform", "track moved during a drag; ending it");
            tracker.reset();
        }
        tracker.host_mut().set_track(track);
        tracker.sink_mut().resize(f64::from(track.width));
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;
        let Some(proxy) = self.proxy.clone() else {
            return;
        };
        let frame = self.config.frame_interval;
        thread::spawn(move || {
            loop {
                if proxy.send_event(UserEvent::Tick).is_err() {
                    break;
                }
                thread::sleep(frame);
            }
        });
    }

    fn audit(&mut self) {
        let Some(interval) = self.config.audit_interval else {
            return;
        };
        if self.last_audit.elapsed() < interval {
            return;
        }
        self.last_audit = Instant::now();
        if let Some(tracker) = self.tracker.as_mut()
            && let Some(msg) = tracker.audit()
        {
            tracker.sink_mut().on_log(&msg);
        }
    }

    fn show_values(&mut self) {
        let (Some(window), Some(tracker)) = (self.window.as_ref(), self.tracker.as_mut()) else {
            return;
        };
        if tracker.sink_mut().take_committed().is_none() {
            return;
        }
        let (min_value, max_value) = tracker.sink().values();
        window.set_title(&format!("{} [{min_value}, {max_value}]", self.config.title));
    }
}

impl ApplicationHandler<UserEvent> for RangerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (w, h) = self.config.window_size;
            let attrs = Window::default_attributes()
                .with_title(self.config.title.as_str())
                .with_inner_size(LogicalSize::new(w, h));
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    self.translator.set_scale_factor(window.scale_factor());
                    self.attach(&window);
                    self.window = Some(window);
                }
                Err(err) => {
                    log::error!(target: "platform", "failed to create window: {err}");
                    self.error = Some(PlatformError::CreateWindow(err));
                    event_loop.exit();
                    return;
                }
            }
        }
        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(tracker) = self.tracker.as_mut()
                    && tracker.sink_mut().run_frame()
                {
                    log::trace!(target: "platform", "frame: {:?}", tracker.sink().layout());
                }
                self.audit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                if let Some(tracker) = self.tracker.take() {
                    let (_, slider) = tracker.detach();
                    log::info!(target: "platform", "final values: {:?}", slider.values());
                }
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(_) => {
                self.relayout();
                return;
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.translator.set_scale_factor(*scale_factor);
                self.relayout();
                return;
            }
            _ => {}
        }

        let Some(raw) = self.translator.translate(&event) else {
            return;
        };
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        if let Some(routed) = tracker.host_mut().route(&raw) {
            let handled = tracker.handle_event(&routed);
            log::trace!(target: "platform", "{} -> {handled:?}", routed.kind.name());
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.show_values();
    }
}
