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

//! Process entry point: boots a game and maps the outcome to an exit code.

use crate::game::GameBuilder;
use ignis_core::platform::Platform;
use ignis_core::renderer::RendererBackend;
use ignis_core::Application;

/// How a call to [`run_game`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The game ran and shut down cleanly.
    Success,
    /// The game factory returned an error.
    GameCreateFailed,
    /// The game did not supply every callback.
    MissingCallbacks,
    /// The engine did not boot, or the game failed to initialize.
    CreateFailed,
    /// The frame loop stopped on an error.
    RunFailed,
}

impl ExitStatus {
    /// The process exit code for this outcome.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::GameCreateFailed => -1,
            ExitStatus::MissingCallbacks => -2,
            ExitStatus::CreateFailed => 1,
            ExitStatus::RunFailed => 2,
        }
    }
}

/// Runs the game built by `create_game` on the given platform and renderer backend.
///
/// The console logger is installed before the factory runs, so every failure
/// is logged; the returned status says which stage failed.
pub fn run_game_with<F>(
    create_game: F,
    platform: Box<dyn Platform>,
    backend: Box<dyn RendererBackend>,
) -> ExitStatus
where
    F: FnOnce() -> anyhow::Result<GameBuilder>,
{
    ignis_core::logging::install_console_logger(log::LevelFilter::Info);

    let builder = match create_game() {
        Ok(builder) => builder,
        Err(e) => {
            log::error!("Could not create game: {e:#}");
            return ExitStatus::GameCreateFailed;
        }
    };

    let (config, game) = match builder.build() {
        Ok(parts) => parts,
        Err(e) => {
            log::error!("The game's function pointers must be assigned: {e}");
            return ExitStatus::MissingCallbacks;
        }
    };

    let app = match Application::create(config, Box::new(game), platform, backend) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Application failed to create: {e}");
            return ExitStatus::CreateFailed;
        }
    };

    match app.run() {
        Ok(summary) => {
            log::debug!(
                "Ran {} frames, {} under the frame budget.",
                summary.frames,
                summary.under_budget_frames
            );
            ExitStatus::Success
        }
        Err(e) => {
            log::error!("Application did not shutdown gracefully: {e}");
            ExitStatus::RunFailed
        }
    }
}

/// Runs the game built by `create_game` in a desktop window.
///
/// Rendering goes through the headless backend until a GPU backend exists.
#[cfg(feature = "platform")]
pub fn run_game<F>(create_game: F) -> ExitStatus
where
    F: FnOnce() -> anyhow::Result<GameBuilder>,
{
    run_game_with(
        create_game,
        Box::new(ignis_infra::WinitPlatform::new()),
        Box::new(ignis_core::renderer::HeadlessBackend::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let all = [
            ExitStatus::Success,
            ExitStatus::GameCreateFailed,
            ExitStatus::MissingCallbacks,
            ExitStatus::CreateFailed,
            ExitStatus::RunFailed,
        ];
        let codes: Vec<i32> = all.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec![0, -1, -2, 1, 2]);
    }

    #[test]
    fn factory_failure_is_reported_through_a_live_logger() {
        let status = run_game_with(
            || Err(anyhow::anyhow!("no assets")),
            Box::new(ignis_core::platform::HeadlessPlatform::new()),
            Box::new(ignis_core::renderer::HeadlessBackend::new()),
        );
        assert_eq!(status, ExitStatus::GameCreateFailed);
        assert_ne!(log::max_level(), log::LevelFilter::Off);
    }
}
