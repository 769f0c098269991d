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

//! Defines the error type for the renderer frontend and its backends.

use std::fmt;

/// An error raised by a [`RendererBackend`](super::RendererBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// The backend could not be brought up.
    InitializationFailed(String),
    /// A frame was begun but could not be submitted.
    EndFrameFailed {
        /// Number of the frame that failed.
        frame_number: u64,
        /// Backend-specific details.
        details: String,
    },
    /// The frontend was used before `initialize`.
    NotInitialized,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::InitializationFailed(details) => {
                write!(f, "Renderer backend failed to initialize: {details}")
            }
            RendererError::EndFrameFailed {
                frame_number,
                details,
            } => {
                write!(f, "Failed to end frame {frame_number}: {details}")
            }
            RendererError::NotInitialized => write!(f, "Renderer used before initialization"),
        }
    }
}

impl std::error::Error for RendererError {}
