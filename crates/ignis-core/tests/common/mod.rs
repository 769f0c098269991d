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

//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use ignis_core::platform::{
    HeadlessPlatform, Platform, PlatformError, PlatformEventSink, WindowSettings,
};
use ignis_core::renderer::{RendererBackend, RendererError};
use ignis_core::{ApplicationConfig, EventBus, Game, GameContext, Key};
use std::cell::RefCell;
use std::rc::Rc;

/// Ordered trace of every collaborator call, shared between the game and the backend.
pub type Trace = Rc<RefCell<Vec<String>>>;

pub fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn count(trace: &Trace, prefix: &str) -> usize {
    trace.borrow().iter().filter(|c| c.starts_with(prefix)).count()
}

pub fn position(trace: &Trace, entry: &str) -> Option<usize> {
    trace.borrow().iter().position(|c| c == entry)
}

/// Small, deterministic configuration for headless runs.
pub fn test_config() -> ApplicationConfig {
    ApplicationConfig {
        name: "Test".to_string(),
        width: 1200,
        height: 600,
        arena_capacity: 64 * 1024,
        ..Default::default()
    }
}

/// `(is_key_down, was_key_down)` for the watched key, sampled during update.
pub type KeySamples = Rc<RefCell<Vec<(bool, bool)>>>;

pub struct RecordingGame {
    pub trace: Trace,
    pub deltas: Rc<RefCell<Vec<f64>>>,
    pub key_samples: KeySamples,
    pub watched_key: Key,
    pub fail_initialize: bool,
    pub fail_update_on: Option<usize>,
    pub fail_render_on: Option<usize>,
    pub on_initialize: Option<Box<dyn FnMut(&EventBus)>>,
    updates: usize,
    renders: usize,
}

impl RecordingGame {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            deltas: Rc::new(RefCell::new(Vec::new())),
            key_samples: Rc::new(RefCell::new(Vec::new())),
            watched_key: Key::A,
            fail_initialize: false,
            fail_update_on: None,
            fail_render_on: None,
            on_initialize: None,
            updates: 0,
            renders: 0,
        }
    }
}

impl Game for RecordingGame {
    fn initialize(&mut self, ctx: &GameContext<'_>) -> bool {
        self.trace.borrow_mut().push("game.initialize".into());
        if let Some(hook) = self.on_initialize.as_mut() {
            hook(ctx.events);
        }
        !self.fail_initialize
    }

    fn update(&mut self, ctx: &GameContext<'_>, delta_time: f64) -> bool {
        self.updates += 1;
        self.trace.borrow_mut().push("game.update".into());
        self.deltas.borrow_mut().push(delta_time);
        self.key_samples.borrow_mut().push((
            ctx.input.is_key_down(self.watched_key),
            ctx.input.was_key_down(self.watched_key),
        ));
        self.fail_update_on != Some(self.updates)
    }

    fn render(&mut self, _ctx: &GameContext<'_>, _delta_time: f64) -> bool {
        self.renders += 1;
        self.trace.borrow_mut().push("game.render".into());
        self.fail_render_on != Some(self.renders)
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.trace
            .borrow_mut()
            .push(format!("game.resize {width}x{height}"));
    }
}

pub struct RecordingBackend {
    pub trace: Trace,
    pub fail_end_frame: bool,
}

impl RecordingBackend {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            fail_end_frame: false,
        }
    }
}

impl RendererBackend for RecordingBackend {
    fn initialize(&mut self, app_name: &str) -> Result<(), RendererError> {
        self.trace
            .borrow_mut()
            .push(format!("renderer.initialize {app_name}"));
        Ok(())
    }

    fn shutdown(&mut self) {
        self.trace.borrow_mut().push("renderer.shutdown".into());
    }

    fn resized(&mut self, width: u32, height: u32) {
        self.trace
            .borrow_mut()
            .push(format!("renderer.resize {width}x{height}"));
    }

    fn begin_frame(&mut self, _delta_time: f64) -> bool {
        self.trace.borrow_mut().push("renderer.begin".into());
        true
    }

    fn end_frame(&mut self, _delta_time: f64) -> Result<(), RendererError> {
        self.trace.borrow_mut().push("renderer.end".into());
        if self.fail_end_frame {
            return Err(RendererError::EndFrameFailed {
                frame_number: 0,
                details: "surface lost".into(),
            });
        }
        Ok(())
    }
}

/// A headless platform that also writes its lifecycle into the shared trace.
pub struct RecordingPlatform {
    pub trace: Trace,
    inner: HeadlessPlatform,
}

impl RecordingPlatform {
    pub fn new(inner: HeadlessPlatform, trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            inner,
        }
    }
}

impl Platform for RecordingPlatform {
    fn startup(&mut self, settings: &WindowSettings) -> Result<(), PlatformError> {
        self.trace.borrow_mut().push("platform.startup".into());
        self.inner.startup(settings)
    }

    fn shutdown(&mut self) {
        self.trace.borrow_mut().push("platform.shutdown".into());
        self.inner.shutdown();
    }

    fn pump_messages(&mut self, sink: &mut PlatformEventSink<'_>) -> bool {
        self.inner.pump_messages(sink)
    }

    fn absolute_time(&self) -> f64 {
        self.inner.absolute_time()
    }

    fn sleep(&self, ms: u64) {
        self.inner.sleep(ms);
    }
}
