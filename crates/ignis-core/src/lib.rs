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

//! The orchestration core of the Ignis engine.
//!
//! This crate provides the pieces every other layer builds on: the systems
//! [`arena`], the synchronous [`event`] bus, the double-buffered [`input`]
//! snapshot, the two-phase [`subsystem`] bootstrapper and the [`application`]
//! frame loop. Windowing and rendering are consumed through the narrow
//! [`platform`] and [`renderer`] contracts, with headless implementations
//! included for tests and windowless runs.

#![warn(missing_docs)]

pub mod application;
pub mod arena;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod input;
pub mod logging;
pub mod memory;
pub mod platform;
pub mod renderer;
pub mod subsystem;

pub use application::{Application, RunSummary};
pub use config::{ApplicationConfig, LoggingConfig};
pub use error::{ApplicationError, BootError, SubsystemError};
pub use event::{Event, EventBus, EventCode, EventContext, ListenerId};
pub use game::{Game, GameContext};
pub use input::{InputSystem, Key, MouseButton};
