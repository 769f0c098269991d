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

//! Error types for booting subsystems and running the application.

use crate::arena::ArenaError;
use crate::config::ConfigError;
use crate::logging::InvalidLogLevel;
use crate::platform::PlatformError;
use crate::renderer::RendererError;
use crate::subsystem::SubsystemKind;
use thiserror::Error;

/// A single subsystem refused to initialize.
#[derive(Debug, Error)]
pub enum SubsystemError {
    /// The subsystem's arena slot cannot hold its state.
    #[error(transparent)]
    Arena(#[from] ArenaError),
    /// The logging configuration is invalid.
    #[error(transparent)]
    Logging(#[from] InvalidLogLevel),
    /// The platform layer could not start.
    #[error(transparent)]
    Platform(#[from] PlatformError),
    /// The renderer backend could not start.
    #[error(transparent)]
    Renderer(#[from] RendererError),
    /// A subsystem was booted before one it depends on.
    #[error("{dependent} requires {dependency} to be booted first")]
    MissingDependency {
        /// The subsystem being booted.
        dependent: SubsystemKind,
        /// The subsystem it needs.
        dependency: SubsystemKind,
    },
    /// Any other failure reported by an extension subsystem.
    #[error("{0}")]
    Other(String),
}

/// The boot sequence was aborted. Subsystems booted before the failure have
/// already been shut down when this is returned.
#[derive(Debug, Error)]
pub enum BootError {
    /// The summed footprint of every subsystem exceeds the arena.
    #[error("subsystems require {required} bytes but the arena has {available} available")]
    ArenaTooSmall {
        /// Sum of every descriptor's requirement.
        required: usize,
        /// Space left in the arena when boot started.
        available: usize,
    },
    /// A placement did not fit the arena.
    #[error(transparent)]
    Arena(#[from] ArenaError),
    /// A subsystem's initializer failed.
    #[error("{kind} subsystem failed to initialize: {source}")]
    Subsystem {
        /// The failing subsystem.
        kind: SubsystemKind,
        /// Why it failed.
        #[source]
        source: SubsystemError,
    },
    /// The registry finished without booting a required subsystem.
    #[error("{0} subsystem was never booted")]
    Missing(SubsystemKind),
}

/// Failures surfaced by [`Application`](crate::application::Application).
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The subsystems could not be booted.
    #[error(transparent)]
    Boot(#[from] BootError),
    /// The game's `initialize` returned `false`.
    #[error("game failed to initialize")]
    GameInitialization,
    /// The game's `update` returned `false`.
    #[error("game update failed")]
    GameUpdate,
    /// The game's `render` returned `false`.
    #[error("game render failed")]
    GameRender,
    /// The renderer could not submit a frame.
    #[error("frame submission failed: {0}")]
    FrameSubmission(#[from] RendererError),
    /// The application has already torn its subsystems down.
    #[error("application has already been shut down")]
    ShutDown,
}
