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

//! The public-facing Software Development Kit (SDK) for the Ignis engine.
//!
//! Games describe themselves with a [`GameBuilder`] and hand a factory for it
//! to [`run_game`], which boots the engine, runs the frame loop and maps the
//! outcome to a process exit code.

pub mod entry;
pub mod game;

pub use entry::{run_game_with, ExitStatus};
#[cfg(feature = "platform")]
pub use entry::run_game;
pub use game::{BuildError, GameBuilder};

pub use ignis_core::{
    Application, ApplicationConfig, ApplicationError, EventBus, EventCode, EventContext,
    GameContext, InputSystem, Key, LoggingConfig, MouseButton, RunSummary,
};

/// Everything a game typically needs in scope.
pub mod prelude {
    pub use crate::{ExitStatus, GameBuilder};
    pub use ignis_core::event::{Event, ListenerId};
    pub use ignis_core::{ApplicationConfig, EventBus, EventCode, EventContext, GameContext, Key, MouseButton};

    #[cfg(feature = "platform")]
    pub use crate::run_game;
}
