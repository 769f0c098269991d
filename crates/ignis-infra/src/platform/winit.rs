// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A `winit`-based implementation of the engine's [`Platform`] trait.

use super::input::translate_window_event;
use ignis_core::platform::{Platform, PlatformError, PlatformEvent, PlatformEventSink, WindowSettings};
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// How many pumps `startup` waits for the window to appear.
const STARTUP_PUMP_ATTEMPTS: usize = 8;

/// A desktop platform driving a single `winit` window.
///
/// The event loop is pumped once per frame instead of being handed control,
/// so the engine keeps ownership of its frame loop.
#[derive(Debug)]
pub struct WinitPlatform {
    event_loop: Option<EventLoop<()>>,
    window: Option<Window>,
    settings: Option<WindowSettings>,
    origin: Instant,
}

impl WinitPlatform {
    /// Creates a platform with no window yet. Call [`Platform::startup`] next.
    pub fn new() -> Self {
        Self {
            event_loop: None,
            window: None,
            settings: None,
            origin: Instant::now(),
        }
    }

    /// The live window, once startup succeeded.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinitPlatform {
    fn startup(&mut self, settings: &WindowSettings) -> Result<(), PlatformError> {
        if self.event_loop.is_some() {
            return Err(PlatformError::AlreadyStarted);
        }
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;

        let mut handler = PumpHandler {
            window: &mut self.window,
            settings,
            sink: None,
            closed: false,
            error: None,
        };
        for _ in 0..STARTUP_PUMP_ATTEMPTS {
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);
            if let Some(error) = handler.error.take() {
                return Err(PlatformError::WindowCreation(error));
            }
            if handler.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(PlatformError::EventLoop(format!(
                    "event loop exited during startup with code {code}"
                )));
            }
        }
        if self.window.is_none() {
            return Err(PlatformError::WindowCreation(
                "the event loop never resumed".to_string(),
            ));
        }

        log::info!(
            "Window '{}' created at ({}, {}) with size {}x{}",
            settings.title,
            settings.x,
            settings.y,
            settings.width,
            settings.height
        );
        self.event_loop = Some(event_loop);
        self.settings = Some(settings.clone());
        self.origin = Instant::now();
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.window.take().is_some() {
            log::info!("Window destroyed.");
        }
        self.event_loop = None;
        self.settings = None;
    }

    fn pump_messages(&mut self, sink: &mut PlatformEventSink<'_>) -> bool {
        let (Some(event_loop), Some(settings)) = (self.event_loop.as_mut(), self.settings.as_ref())
        else {
            log::warn!("pump_messages called before the platform was started.");
            return false;
        };

        let mut handler = PumpHandler {
            window: &mut self.window,
            settings,
            sink: Some(sink),
            closed: false,
            error: None,
        };
        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut handler);
        if let Some(error) = handler.error.take() {
            log::error!("Window recreation failed: {error}");
            return false;
        }
        !handler.closed && !matches!(status, PumpStatus::Exit(_))
    }

    fn absolute_time(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Handler lent to `winit` for the duration of one pump.
struct PumpHandler<'p, 's, 'a> {
    window: &'p mut Option<Window>,
    settings: &'p WindowSettings,
    sink: Option<&'s mut PlatformEventSink<'a>>,
    closed: bool,
    error: Option<String>,
}

impl ApplicationHandler for PumpHandler<'_, '_, '_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_position(PhysicalPosition::new(self.settings.x, self.settings.y))
            .with_visible(true);
        match event_loop.create_window(attributes) {
            Ok(window) => *self.window = Some(window),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(translated) = translate_window_event(&event) else {
            return;
        };
        if translated == PlatformEvent::Close {
            self.closed = true;
        }
        match self.sink.as_deref_mut() {
            Some(sink) => translated.dispatch(sink),
            None => log::trace!("Dropping {translated:?} received before the frame loop started."),
        }
    }
}
