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

// Ignis Testbed
// Minimal game used to exercise the engine loop by hand.

use anyhow::{Context, Result};
use ignis_sdk::prelude::*;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

/// Window and pacing settings used when no config file is given.
fn testbed_config() -> ApplicationConfig {
    ApplicationConfig {
        name: "Ignis Engine Testbed".to_string(),
        start_pos_x: 100,
        start_pos_y: 100,
        width: 1200,
        height: 600,
        ..ApplicationConfig::default()
    }
}

/// Builds the testbed game, reading its config from the first argument if present.
fn create_game() -> Result<GameBuilder> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ApplicationConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => testbed_config(),
    };

    let elapsed = Rc::new(Cell::new(0.0_f64));
    let frames = Rc::new(Cell::new(0_u64));

    let builder = GameBuilder::new(config)
        .on_initialize(|ctx| {
            log::debug!("Testbed initialized ({:?}).", ctx.events);
            true
        })
        .on_update({
            let elapsed = elapsed.clone();
            let frames = frames.clone();
            move |ctx, delta_time| {
                elapsed.set(elapsed.get() + delta_time);
                frames.set(frames.get() + 1);
                if ctx.input.is_key_down(Key::SPACE) && ctx.input.was_key_up(Key::SPACE) {
                    log::info!(
                        "{} frames in {:.2}s, cursor at {:?}",
                        frames.get(),
                        elapsed.get(),
                        ctx.input.mouse_position()
                    );
                }
                true
            }
        })
        .on_render(|_ctx, _delta_time| true)
        .on_resize(|width, height| log::debug!("Testbed viewport is now {width}x{height}."));
    Ok(builder)
}

fn main() {
    let status = run_game(create_game);
    std::process::exit(status.code());
}
