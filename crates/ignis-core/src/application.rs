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

//! The application orchestrator: boot, frame loop, teardown.
//!
//! [`Application::create`] boots the engine subsystems into a fresh arena,
//! registers the core listeners and initializes the game.
//! [`Application::run`] then drives the frame loop until quit and tears
//! everything down in reverse boot order.

use crate::arena::Arena;
use crate::clock::Clock;
use crate::config::ApplicationConfig;
use crate::error::ApplicationError;
use crate::event::{Event, EventBus, EventCode, EventContext, ListenerId};
use crate::game::{Game, GameContext};
use crate::input::Key;
use crate::platform::{Platform, PlatformEventSink};
use crate::renderer::{RenderPacket, RendererBackend};
use crate::subsystem::{SubsystemRegistry, Subsystems};
use std::cell::Cell;
use std::rc::Rc;

/// Codes the application itself listens to.
const CORE_EVENTS: [EventCode; 4] = [
    EventCode::APPLICATION_QUIT,
    EventCode::KEY_PRESSED,
    EventCode::KEY_RELEASED,
    EventCode::RESIZED,
];

/// Loop flags shared with the core listeners.
#[derive(Debug)]
struct LoopState {
    running: Cell<bool>,
    suspended: Cell<bool>,
    width: Cell<u32>,
    height: Cell<u32>,
    pending_resize: Cell<Option<(u32, u32)>>,
}

impl LoopState {
    fn new(width: u32, height: u32) -> Self {
        Self {
            running: Cell::new(false),
            suspended: Cell::new(false),
            width: Cell::new(width),
            height: Cell::new(height),
            pending_resize: Cell::new(None),
        }
    }

    /// Applies a reported viewport size.
    ///
    /// A zero dimension suspends the loop. A genuine non-zero change resumes
    /// it and queues one notification for the game and renderer; a size
    /// already queued stays queued when a zero size follows it in the same
    /// pump. Returns `true` when the event is consumed.
    fn on_resized(&self, width: u32, height: u32) -> bool {
        if (width, height) == (self.width.get(), self.height.get()) {
            return false;
        }
        self.width.set(width);
        self.height.set(height);
        log::debug!("Window resize: {width}, {height}");

        if width == 0 || height == 0 {
            log::info!("Window minimized, suspending application.");
            self.suspended.set(true);
            return true;
        }
        if self.suspended.get() {
            log::info!("Window restored, resuming application.");
            self.suspended.set(false);
        }
        self.pending_resize.set(Some((width, height)));
        false
    }
}

/// Counters reported when the frame loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Frames that ran update and render.
    pub frames: u64,
    /// Frames that finished inside the target interval.
    pub under_budget_frames: u64,
    /// Clock time the loop ran for, in seconds.
    pub elapsed: f64,
}

/// Owns the arena, the subsystems and the game for one process run.
pub struct Application {
    config: ApplicationConfig,
    game: Box<dyn Game>,
    systems: Option<Subsystems>,
    arena: Arena,
    clock: Clock,
    state: Rc<LoopState>,
    listener: ListenerId,
}

impl Application {
    /// Boots the engine subsystems and initializes `game`.
    ///
    /// ## Arguments
    /// * `config` - Window, arena and pacing settings.
    /// * `game` - The embedding game.
    /// * `platform` - The windowing backend.
    /// * `backend` - The rendering backend.
    ///
    /// ## Errors
    /// Returns an error if the configuration is invalid, any subsystem fails
    /// to boot, or the game fails to initialize. Nothing is left running.
    pub fn create(
        config: ApplicationConfig,
        game: Box<dyn Game>,
        platform: Box<dyn Platform>,
        backend: Box<dyn RendererBackend>,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;
        let registry = SubsystemRegistry::engine(&config, platform, backend);
        Self::create_with_registry(config, game, registry)
    }

    /// Like [`Application::create`], booting a caller-supplied registry.
    ///
    /// The registry must fill every engine subsystem slot.
    pub fn create_with_registry(
        config: ApplicationConfig,
        game: Box<dyn Game>,
        registry: SubsystemRegistry,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;
        let mut arena = Arena::with_capacity(config.arena_capacity);
        let systems = registry.boot(&mut arena)?.into_subsystems()?;

        let state = Rc::new(LoopState::new(config.width, config.height));
        let listener = systems.events.allocate_listener();
        register_core_listeners(&systems.events, listener, &state);

        let mut app = Self {
            config,
            game,
            systems: Some(systems),
            arena,
            clock: Clock::new(),
            state,
            listener,
        };

        let Some(systems) = app.systems.as_ref() else {
            return Err(ApplicationError::ShutDown);
        };
        let ctx = GameContext {
            input: &systems.input,
            events: &systems.events,
        };
        if !app.game.initialize(&ctx) {
            log::error!("FATAL: Failed to initialize game.");
            return Err(ApplicationError::GameInitialization);
        }
        app.game.on_resize(app.config.width, app.config.height);

        log::info!(
            "Application '{}' created ({} of {} arena bytes used).",
            app.config.name,
            app.arena.used(),
            app.arena.capacity()
        );
        Ok(app)
    }

    /// The current viewport size.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        (self.state.width.get(), self.state.height.get())
    }

    /// The configuration this application was created with.
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// The booted subsystems, until the application shuts down.
    pub fn subsystems(&self) -> Option<&Subsystems> {
        self.systems.as_ref()
    }

    /// Runs the frame loop until quit, then shuts everything down.
    ///
    /// ## Errors
    /// A failing game update or render, or a failed frame submission, stops
    /// the loop. Shutdown still runs before the error is returned.
    pub fn run(mut self) -> Result<RunSummary, ApplicationError> {
        let outcome = self.run_frames();
        self.teardown();
        match &outcome {
            Ok(summary) => log::info!(
                "Application stopped after {} frames ({:.2}s).",
                summary.frames,
                summary.elapsed
            ),
            Err(e) => log::error!("Application stopped: {e}"),
        }
        outcome
    }

    fn run_frames(&mut self) -> Result<RunSummary, ApplicationError> {
        let Some(systems) = self.systems.as_mut() else {
            return Err(ApplicationError::ShutDown);
        };

        self.state.running.set(true);
        self.clock.start(systems.platform.absolute_time());
        self.clock.update(systems.platform.absolute_time());
        let mut last_time = self.clock.elapsed();
        let target_frame_seconds = self.config.target_frame_seconds();
        let mut summary = RunSummary::default();

        log::info!("{}", systems.memory.usage_report());

        while self.state.running.get() {
            let alive = {
                let Subsystems {
                    events,
                    input,
                    platform,
                    ..
                } = &mut *systems;
                let mut sink = PlatformEventSink::new(events, input);
                platform.pump_messages(&mut sink)
            };
            if !alive {
                self.state.running.set(false);
            }

            if let Some((width, height)) = self.state.pending_resize.take() {
                self.game.on_resize(width, height);
                systems.renderer.on_resize(width, height);
            }

            if !self.state.running.get() {
                break;
            }
            if self.state.suspended.get() {
                continue;
            }

            self.clock.update(systems.platform.absolute_time());
            let current_time = self.clock.elapsed();
            let delta = current_time - last_time;
            let frame_start_time = systems.platform.absolute_time();

            let ctx = GameContext {
                input: &systems.input,
                events: &systems.events,
            };
            if !self.game.update(&ctx, delta) {
                log::error!("FATAL: Game update failed, shutting down.");
                return Err(ApplicationError::GameUpdate);
            }
            if !self.game.render(&ctx, delta) {
                log::error!("FATAL: Game render failed, shutting down.");
                return Err(ApplicationError::GameRender);
            }

            let packet = RenderPacket { delta_time: delta };
            systems.renderer.draw_frame(&packet)?;

            let frame_elapsed_time = systems.platform.absolute_time() - frame_start_time;
            let remaining_seconds = target_frame_seconds - frame_elapsed_time;
            if remaining_seconds > 0.0 {
                summary.under_budget_frames += 1;
                let remaining_ms = (remaining_seconds * 1000.0) as u64;
                if self.config.limit_frames && remaining_ms > 0 {
                    systems
                        .platform
                        .sleep(remaining_ms.saturating_sub(self.config.frame_guard_ms));
                }
            }
            summary.frames += 1;

            systems.input.update();
            last_time = current_time;
        }

        summary.elapsed = self.clock.elapsed();
        log::debug!(
            "{} of {} frames finished under the {:.4}s target.",
            summary.under_budget_frames,
            summary.frames,
            target_frame_seconds
        );
        Ok(summary)
    }

    fn teardown(&mut self) {
        let Some(systems) = self.systems.take() else {
            return;
        };
        self.state.running.set(false);
        self.clock.stop();
        release_core_listeners(&systems.events, self.listener);
        systems.shutdown();
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("arena_used", &self.arena.used())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn register_core_listeners(events: &EventBus, listener: ListenerId, state: &Rc<LoopState>) {
    let quit_state = Rc::clone(state);
    events.register(EventCode::APPLICATION_QUIT, listener, move |_, _| {
        log::info!("APPLICATION_QUIT received, shutting down.");
        quit_state.running.set(false);
        false
    });

    events.register(EventCode::KEY_PRESSED, listener, on_key);
    events.register(EventCode::KEY_RELEASED, listener, on_key);

    let resize_state = Rc::clone(state);
    events.register(EventCode::RESIZED, listener, move |_, event| {
        match event.context.as_u16() {
            Some(&[width, height, ..]) => {
                resize_state.on_resized(u32::from(width), u32::from(height))
            }
            None => false,
        }
    });
}

fn release_core_listeners(events: &EventBus, listener: ListenerId) {
    for code in CORE_EVENTS {
        events.unregister(code, listener);
    }
}

fn on_key(events: &EventBus, event: &Event) -> bool {
    let Some(&[code, ..]) = event.context.as_u16() else {
        return false;
    };
    let key = Key(code);
    if event.code == EventCode::KEY_PRESSED {
        if key == Key::ESCAPE {
            events.fire(
                EventCode::APPLICATION_QUIT,
                Some(event.listener),
                EventContext::None,
            );
            return true;
        }
        log::debug!("'{key}' key pressed in window.");
    } else {
        log::debug!("'{key}' key released in window.");
    }
    false
}
