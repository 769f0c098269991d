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

use super::{RendererBackend, RendererError};

/// A backend that accepts every frame and draws nothing.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    app_name: Option<String>,
    size: (u32, u32),
    frames: u64,
}

impl HeadlessBackend {
    /// Creates an uninitialized headless backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last size reported through `resized`.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Frames ended so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RendererBackend for HeadlessBackend {
    fn initialize(&mut self, app_name: &str) -> Result<(), RendererError> {
        log::info!("Headless renderer backend initialized.");
        self.app_name = Some(app_name.to_string());
        Ok(())
    }

    fn shutdown(&mut self) {
        log::info!("Headless renderer backend shut down.");
        self.app_name = None;
    }

    fn resized(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn begin_frame(&mut self, _delta_time: f64) -> bool {
        self.app_name.is_some()
    }

    fn end_frame(&mut self, _delta_time: f64) -> Result<(), RendererError> {
        self.frames += 1;
        Ok(())
    }
}
