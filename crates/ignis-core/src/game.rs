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

//! The capability set an embedding game supplies to the application.

use crate::event::EventBus;
use crate::input::InputSystem;

/// Engine services visible to a game during its callbacks.
#[derive(Debug, Clone, Copy)]
pub struct GameContext<'a> {
    /// The input snapshot. "Previous" holds the state from the prior frame.
    pub input: &'a InputSystem,
    /// The event bus, for firing or subscribing to events.
    pub events: &'a EventBus,
}

/// A game driven by the frame loop.
///
/// `update` and `render` run once per non-suspended frame, in that order.
/// Returning `false` from any of `initialize`, `update` or `render` is fatal.
pub trait Game {
    /// Called once after every subsystem has booted.
    fn initialize(&mut self, ctx: &GameContext<'_>) -> bool;

    /// Advances the simulation by `delta_time` seconds.
    fn update(&mut self, ctx: &GameContext<'_>, delta_time: f64) -> bool;

    /// Prepares the frame's rendering work.
    fn render(&mut self, ctx: &GameContext<'_>, delta_time: f64) -> bool;

    /// The viewport changed to a non-zero size.
    fn on_resize(&mut self, width: u32, height: u32);
}
