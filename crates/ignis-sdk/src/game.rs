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

//! Describing a game as a set of callbacks.

use ignis_core::{ApplicationConfig, Game, GameContext};
use thiserror::Error;

type InitializeFn = Box<dyn FnMut(&GameContext<'_>) -> bool>;
type FrameFn = Box<dyn FnMut(&GameContext<'_>, f64) -> bool>;
type ResizeFn = Box<dyn FnMut(u32, u32)>;

/// Raised when a [`GameBuilder`] is incomplete.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// One or more required callbacks were never supplied.
    #[error("game is missing required callbacks: {}", .0.join(", "))]
    MissingCallbacks(Vec<&'static str>),
}

/// Collects the application configuration and the four game callbacks.
///
/// Every callback is required. Game state lives in whatever the closures
/// capture.
///
/// # Example
///
/// ```no_run
/// use ignis_sdk::{ApplicationConfig, GameBuilder};
///
/// let builder = GameBuilder::new(ApplicationConfig::default())
///     .on_initialize(|_ctx| true)
///     .on_update(|_ctx, _dt| true)
///     .on_render(|_ctx, _dt| true)
///     .on_resize(|_w, _h| {});
/// assert!(builder.is_complete());
/// ```
pub struct GameBuilder {
    config: ApplicationConfig,
    initialize: Option<InitializeFn>,
    update: Option<FrameFn>,
    render: Option<FrameFn>,
    resize: Option<ResizeFn>,
}

impl GameBuilder {
    /// Starts a builder for a game running with `config`.
    pub fn new(config: ApplicationConfig) -> Self {
        Self {
            config,
            initialize: None,
            update: None,
            render: None,
            resize: None,
        }
    }

    /// Called once after the engine has booted. Returning `false` aborts startup.
    pub fn on_initialize<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GameContext<'_>) -> bool + 'static,
    {
        self.initialize = Some(Box::new(f));
        self
    }

    /// Called every frame with the frame delta in seconds. Returning `false` stops the loop.
    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GameContext<'_>, f64) -> bool + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }

    /// Called every frame after a successful update. Returning `false` stops the loop.
    pub fn on_render<F>(mut self, f: F) -> Self
    where
        F: FnMut(&GameContext<'_>, f64) -> bool + 'static,
    {
        self.render = Some(Box::new(f));
        self
    }

    /// Called when the viewport size changes.
    pub fn on_resize<F>(mut self, f: F) -> Self
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.resize = Some(Box::new(f));
        self
    }

    /// The configuration the game will run with.
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut ApplicationConfig {
        &mut self.config
    }

    /// Returns `true` when every callback is present.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.initialize.is_none() {
            missing.push("initialize");
        }
        if self.update.is_none() {
            missing.push("update");
        }
        if self.render.is_none() {
            missing.push("render");
        }
        if self.resize.is_none() {
            missing.push("on_resize");
        }
        missing
    }

    /// Splits the builder into its configuration and a [`Game`].
    ///
    /// # Errors
    /// Returns [`BuildError::MissingCallbacks`] naming every absent callback.
    pub fn build(self) -> Result<(ApplicationConfig, CallbackGame), BuildError> {
        let missing = self.missing();
        match (self.initialize, self.update, self.render, self.resize) {
            (Some(initialize), Some(update), Some(render), Some(resize)) => Ok((
                self.config,
                CallbackGame {
                    initialize,
                    update,
                    render,
                    resize,
                },
            )),
            _ => Err(BuildError::MissingCallbacks(missing)),
        }
    }
}

impl std::fmt::Debug for GameBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameBuilder")
            .field("config", &self.config)
            .field("missing", &self.missing())
            .finish()
    }
}

/// A [`Game`] whose behavior is a set of closures. Produced by [`GameBuilder::build`].
pub struct CallbackGame {
    initialize: InitializeFn,
    update: FrameFn,
    render: FrameFn,
    resize: ResizeFn,
}

impl Game for CallbackGame {
    fn initialize(&mut self, ctx: &GameContext<'_>) -> bool {
        (self.initialize)(ctx)
    }

    fn update(&mut self, ctx: &GameContext<'_>, delta_time: f64) -> bool {
        (self.update)(ctx, delta_time)
    }

    fn render(&mut self, ctx: &GameContext<'_>, delta_time: f64) -> bool {
        (self.render)(ctx, delta_time)
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        (self.resize)(width, height)
    }
}
