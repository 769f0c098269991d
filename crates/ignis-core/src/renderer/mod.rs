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

//! The renderer frontend and the backend contract it drives.
//!
//! The frame loop only ever calls [`RendererFrontend::draw_frame`]; the
//! frontend composes the backend's begin/end protocol and counts frames.

mod error;
mod headless;

pub use self::error::RendererError;
pub use self::headless::HeadlessBackend;

/// Per-frame data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderPacket {
    /// Seconds since the previous frame.
    pub delta_time: f64,
}

/// A concrete rendering backend.
pub trait RendererBackend {
    /// Brings the backend up for the named application.
    fn initialize(&mut self, app_name: &str) -> Result<(), RendererError>;

    /// Releases every backend resource.
    fn shutdown(&mut self);

    /// The output surface changed size.
    fn resized(&mut self, width: u32, height: u32);

    /// Prepares a frame. Returning `false` skips this frame without error.
    fn begin_frame(&mut self, delta_time: f64) -> bool;

    /// Submits the frame begun by `begin_frame`.
    fn end_frame(&mut self, delta_time: f64) -> Result<(), RendererError>;
}

/// Owns the active backend and drives it once per frame.
pub struct RendererFrontend {
    backend: Box<dyn RendererBackend>,
    frame_number: u64,
    initialized: bool,
}

impl RendererFrontend {
    /// Wraps a backend. Nothing is initialized yet.
    pub fn new(backend: Box<dyn RendererBackend>) -> Self {
        Self {
            backend,
            frame_number: 0,
            initialized: false,
        }
    }

    /// Initializes the backend.
    ///
    /// ## Arguments
    /// * `app_name` - Name reported to the backend, typically the window title.
    pub fn initialize(&mut self, app_name: &str) -> Result<(), RendererError> {
        self.backend.initialize(app_name)?;
        self.initialized = true;
        log::info!("Renderer initialized for '{app_name}'.");
        Ok(())
    }

    /// Shuts the backend down if it was initialized.
    pub fn shutdown(&mut self) {
        if self.initialized {
            self.backend.shutdown();
            self.initialized = false;
            log::info!("Renderer shut down after {} frames.", self.frame_number);
        }
    }

    /// Forwards a new surface size to the backend.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.initialized {
            log::warn!("Renderer backend does not exist to accept resize: {width} {height}");
            return;
        }
        self.backend.resized(width, height);
    }

    /// Runs one begin/end cycle.
    ///
    /// ## Returns
    /// `Ok` when the frame was submitted or the backend declined it. A failure
    /// to end a begun frame is fatal and returned as an error.
    pub fn draw_frame(&mut self, packet: &RenderPacket) -> Result<(), RendererError> {
        if !self.initialized {
            return Err(RendererError::NotInitialized);
        }
        if !self.backend.begin_frame(packet.delta_time) {
            log::trace!("Backend skipped frame {}.", self.frame_number);
            return Ok(());
        }
        self.backend.end_frame(packet.delta_time).map_err(|e| {
            log::error!("renderer end_frame failed, application shutting down: {e}");
            e
        })?;
        self.frame_number += 1;
        Ok(())
    }

    /// Number of frames successfully submitted.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Whether `initialize` succeeded and `shutdown` has not run since.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl std::fmt::Debug for RendererFrontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererFrontend")
            .field("frame_number", &self.frame_number)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
