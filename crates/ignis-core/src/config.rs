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

//! Application configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default size of the systems arena: 64 MiB.
pub const DEFAULT_ARENA_CAPACITY: usize = 64 * 1024 * 1024;

/// Errors raised while loading or validating an [`ApplicationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid JSON for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the engine cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for the logging subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level written to the console (`"error"` through `"trace"`, or `"off"`).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Everything needed to create an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window title and renderer application name.
    pub name: String,
    /// Initial window x position.
    pub start_pos_x: i32,
    /// Initial window y position.
    pub start_pos_y: i32,
    /// Initial viewport width.
    pub width: u32,
    /// Initial viewport height.
    pub height: u32,
    /// Size of the systems arena in bytes.
    pub arena_capacity: usize,
    /// Frames per second the loop paces itself against.
    pub target_frame_rate: u32,
    /// Sleep away the unused part of each frame.
    pub limit_frames: bool,
    /// Milliseconds subtracted from each limiter sleep.
    pub frame_guard_ms: u64,
    /// Logging subsystem settings.
    pub logging: LoggingConfig,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "Ignis Application".to_string(),
            start_pos_x: 100,
            start_pos_y: 100,
            width: 1280,
            height: 720,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            target_frame_rate: 60,
            limit_frames: false,
            frame_guard_ms: 1,
            logging: LoggingConfig::default(),
        }
    }
}

impl ApplicationConfig {
    /// Load a configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Rejects values the frame loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_capacity == 0 {
            return Err(ConfigError::Invalid("arena_capacity must be non-zero".into()));
        }
        if self.target_frame_rate == 0 {
            return Err(ConfigError::Invalid("target_frame_rate must be non-zero".into()));
        }
        Ok(())
    }

    /// Length of one frame at the target rate, in seconds.
    pub fn target_frame_seconds(&self) -> f64 {
        1.0 / f64::from(self.target_frame_rate)
    }
}
