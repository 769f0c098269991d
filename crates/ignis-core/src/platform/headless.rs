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

//! A windowless platform that replays a scripted sequence of OS events.

use super::{Platform, PlatformError, PlatformEventSink, WindowSettings};
use crate::input::{Key, MouseButton};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// One OS notification replayed by the [`HeadlessPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    Quit,
    /// The window was destroyed. The pump reports termination.
    Close,
    /// The inner size changed.
    Resized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// A key transition.
    Key {
        /// The key.
        key: Key,
        /// `true` for down.
        pressed: bool,
    },
    /// A mouse button transition.
    Button {
        /// The button.
        button: MouseButton,
        /// `true` for down.
        pressed: bool,
    },
    /// The cursor moved.
    MouseMove {
        /// Window x coordinate.
        x: i16,
        /// Window y coordinate.
        y: i16,
    },
    /// The wheel turned.
    MouseWheel(i8),
}

impl PlatformEvent {
    /// Routes the event into the engine through `sink`.
    ///
    /// [`PlatformEvent::Close`] carries nothing for the engine; the platform
    /// reports it by returning `false` from its pump.
    pub fn dispatch(self, sink: &mut PlatformEventSink<'_>) {
        match self {
            PlatformEvent::Quit => sink.quit(),
            PlatformEvent::Close => {}
            PlatformEvent::Resized { width, height } => sink.resized(width, height),
            PlatformEvent::Key { key, pressed } => sink.key(key, pressed),
            PlatformEvent::Button { button, pressed } => sink.button(button, pressed),
            PlatformEvent::MouseMove { x, y } => sink.mouse_move(x, y),
            PlatformEvent::MouseWheel(delta) => sink.mouse_wheel(delta),
        }
    }
}

#[derive(Debug)]
enum TimeSource {
    Monotonic(Instant),
    Stepped { now: Cell<f64>, step: f64 },
}

#[derive(Debug, Default)]
struct RecorderState {
    started: Cell<bool>,
    shut_down: Cell<bool>,
    pumps: Cell<u32>,
    sleeps: RefCell<Vec<u64>>,
    settings: RefCell<Option<WindowSettings>>,
}

/// Shared view of what a [`HeadlessPlatform`] has been asked to do.
///
/// The platform is moved into the application, so tests keep a recorder to
/// observe it afterwards.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRecorder {
    state: Rc<RecorderState>,
}

impl HeadlessRecorder {
    /// Whether `startup` ran.
    pub fn started(&self) -> bool {
        self.state.started.get()
    }

    /// Whether `shutdown` ran.
    pub fn shut_down(&self) -> bool {
        self.state.shut_down.get()
    }

    /// Number of pumps so far.
    pub fn pumps(&self) -> u32 {
        self.state.pumps.get()
    }

    /// Every sleep request, in milliseconds.
    pub fn sleeps(&self) -> Vec<u64> {
        self.state.sleeps.borrow().clone()
    }

    /// The settings the window was created with.
    pub fn window_settings(&self) -> Option<WindowSettings> {
        self.state.settings.borrow().clone()
    }
}

/// A platform with no window, driven by a script of per-pump events.
#[derive(Debug)]
pub struct HeadlessPlatform {
    script: VecDeque<Vec<PlatformEvent>>,
    terminate_when_exhausted: bool,
    time: TimeSource,
    recorder: HeadlessRecorder,
}

impl HeadlessPlatform {
    /// A platform that reports nothing and runs until something fires quit.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            terminate_when_exhausted: false,
            time: TimeSource::Monotonic(Instant::now()),
            recorder: HeadlessRecorder::default(),
        }
    }

    /// Replays `frames`, one entry per pump, then reports termination.
    pub fn with_script(mut self, frames: impl IntoIterator<Item = Vec<PlatformEvent>>) -> Self {
        self.script = frames.into_iter().collect();
        self.terminate_when_exhausted = true;
        self
    }

    /// Keeps pumping idle frames after the script runs out.
    pub fn keep_alive(mut self) -> Self {
        self.terminate_when_exhausted = false;
        self
    }

    /// Replaces wall-clock time with a clock advancing `step` seconds per pump.
    ///
    /// Sleep requests also advance this clock instead of blocking.
    pub fn with_time_step(mut self, step: f64) -> Self {
        self.time = TimeSource::Stepped {
            now: Cell::new(0.0),
            step,
        };
        self
    }

    /// A handle for observing this platform after it has been moved.
    pub fn recorder(&self) -> HeadlessRecorder {
        self.recorder.clone()
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn startup(&mut self, settings: &WindowSettings) -> Result<(), PlatformError> {
        if self.recorder.started() && !self.recorder.shut_down() {
            return Err(PlatformError::AlreadyStarted);
        }
        log::info!(
            "Headless platform started for '{}' ({}x{}).",
            settings.title,
            settings.width,
            settings.height
        );
        *self.recorder.state.settings.borrow_mut() = Some(settings.clone());
        self.recorder.state.started.set(true);
        self.recorder.state.shut_down.set(false);
        Ok(())
    }

    fn shutdown(&mut self) {
        log::info!("Headless platform shut down.");
        self.recorder.state.shut_down.set(true);
    }

    fn pump_messages(&mut self, sink: &mut PlatformEventSink<'_>) -> bool {
        let state = &self.recorder.state;
        state.pumps.set(state.pumps.get() + 1);
        if let TimeSource::Stepped { now, step } = &self.time {
            now.set(now.get() + step);
        }

        let Some(frame) = self.script.pop_front() else {
            return !self.terminate_when_exhausted;
        };
        let mut alive = true;
        for event in frame {
            if event == PlatformEvent::Close {
                alive = false;
            }
            event.dispatch(sink);
        }
        alive
    }

    fn absolute_time(&self) -> f64 {
        match &self.time {
            TimeSource::Monotonic(origin) => origin.elapsed().as_secs_f64(),
            TimeSource::Stepped { now, .. } => now.get(),
        }
    }

    fn sleep(&self, ms: u64) {
        self.recorder.state.sleeps.borrow_mut().push(ms);
        match &self.time {
            TimeSource::Monotonic(_) => std::thread::sleep(std::time::Duration::from_millis(ms)),
            TimeSource::Stepped { now, .. } => now.set(now.get() + ms as f64 / 1000.0),
        }
    }
}
