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

//! The platform contract consumed by the frame loop.
//!
//! A [`Platform`] owns the window and the OS message pump. During
//! [`Platform::pump_messages`] it reports what happened through a
//! [`PlatformEventSink`], which routes input into the [`InputSystem`] and
//! window notifications into the [`EventBus`].

mod headless;

pub use self::headless::{HeadlessPlatform, HeadlessRecorder, PlatformEvent};

use crate::event::{EventBus, EventCode, EventContext};
use crate::input::{InputSystem, Key, MouseButton};
use thiserror::Error;

/// Errors raised while bringing the platform layer up.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The OS event loop could not be created.
    #[error("failed to create the event loop: {0}")]
    EventLoop(String),
    /// The window could not be created.
    #[error("failed to create the window: {0}")]
    WindowCreation(String),
    /// The platform was started twice.
    #[error("platform already started")]
    AlreadyStarted,
}

/// Where and how large the window should be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Initial x position.
    pub x: i32,
    /// Initial y position.
    pub y: i32,
    /// Initial inner width.
    pub width: u32,
    /// Initial inner height.
    pub height: u32,
}

/// A windowing backend.
pub trait Platform {
    /// Creates the window.
    fn startup(&mut self, settings: &WindowSettings) -> Result<(), PlatformError>;

    /// Destroys the window.
    fn shutdown(&mut self);

    /// Processes pending OS messages without blocking.
    ///
    /// Returns `false` when the platform wants the application to terminate.
    fn pump_messages(&mut self, sink: &mut PlatformEventSink<'_>) -> bool;

    /// Monotonic time in seconds.
    fn absolute_time(&self) -> f64;

    /// Blocks the calling thread for `ms` milliseconds.
    fn sleep(&self, ms: u64);
}

/// Routes platform notifications into the engine during a pump.
pub struct PlatformEventSink<'a> {
    events: &'a EventBus,
    input: &'a mut InputSystem,
}

impl<'a> PlatformEventSink<'a> {
    /// Binds a sink to the live bus and input snapshot.
    pub fn new(events: &'a EventBus, input: &'a mut InputSystem) -> Self {
        Self { events, input }
    }

    /// The user asked to close the window.
    pub fn quit(&mut self) {
        self.events
            .fire(EventCode::APPLICATION_QUIT, None, EventContext::None);
    }

    /// The inner size of the window changed. Sizes beyond `u16::MAX` are clamped.
    pub fn resized(&mut self, width: u32, height: u32) {
        let clamp = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
        self.events.fire(
            EventCode::RESIZED,
            None,
            EventContext::resize(clamp(width), clamp(height)),
        );
    }

    /// A key went down or up.
    pub fn key(&mut self, key: Key, pressed: bool) {
        self.input.process_key(self.events, key, pressed);
    }

    /// A mouse button went down or up.
    pub fn button(&mut self, button: MouseButton, pressed: bool) {
        self.input.process_button(self.events, button, pressed);
    }

    /// The cursor moved to `(x, y)` in window coordinates.
    pub fn mouse_move(&mut self, x: i16, y: i16) {
        self.input.process_mouse_move(self.events, x, y);
    }

    /// The wheel turned. Platforms flatten the delta to -1 or 1.
    pub fn mouse_wheel(&mut self, delta: i8) {
        self.input.process_mouse_wheel(self.events, delta);
    }
}
