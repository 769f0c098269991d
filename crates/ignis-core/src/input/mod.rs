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

//! Double-buffered keyboard and mouse state.
//!
//! The platform layer writes into the *current* half through the `process_*`
//! methods, which fire the matching bus event on every real change. Once per
//! simulated frame the application calls [`InputSystem::update`], copying
//! current into *previous* so that "was down" queries see the prior frame.
//!
//! Both halves live in the arena slot handed to [`InputSystem::initialize`]:
//!
//! | bytes        | content                                  |
//! |--------------|------------------------------------------|
//! | `0..256`     | current keyboard, one byte per key       |
//! | `256..512`   | previous keyboard                        |
//! | `512..519`   | current mouse: x, y (`i16` LE), buttons  |
//! | `519..526`   | previous mouse                           |

mod keys;

pub use self::keys::{Key, MouseButton};

use crate::arena::{ArenaError, ArenaSlot};
use crate::event::{EventBus, EventCode, EventContext};
use std::ops::Range;

const KEYBOARD_BYTES: usize = Key::COUNT;
const MOUSE_BYTES: usize = 4 + MouseButton::COUNT;

const KEYS_CURRENT: usize = 0;
const KEYS_PREVIOUS: usize = KEYS_CURRENT + KEYBOARD_BYTES;
const MOUSE_CURRENT: usize = KEYS_PREVIOUS + KEYBOARD_BYTES;
const MOUSE_PREVIOUS: usize = MOUSE_CURRENT + MOUSE_BYTES;

/// Which half of the snapshot a read targets.
#[derive(Clone, Copy)]
enum Half {
    Current,
    Previous,
}

impl Half {
    fn keys(self) -> usize {
        match self {
            Half::Current => KEYS_CURRENT,
            Half::Previous => KEYS_PREVIOUS,
        }
    }

    fn mouse(self) -> usize {
        match self {
            Half::Current => MOUSE_CURRENT,
            Half::Previous => MOUSE_PREVIOUS,
        }
    }
}

fn span(start: usize, len: usize) -> Range<usize> {
    start..start + len
}

fn read_position(bytes: &[u8], half: Half) -> (i16, i16) {
    let at = half.mouse();
    (
        i16::from_le_bytes([bytes[at], bytes[at + 1]]),
        i16::from_le_bytes([bytes[at + 2], bytes[at + 3]]),
    )
}

fn button_byte(half: Half, button: MouseButton) -> usize {
    half.mouse() + 4 + button.index()
}

/// The input snapshot subsystem.
#[derive(Debug, Default)]
pub struct InputSystem {
    state: Option<ArenaSlot>,
}

impl InputSystem {
    /// Arena bytes needed for both halves of the snapshot.
    pub const REQUIRED_BYTES: usize = MOUSE_PREVIOUS + MOUSE_BYTES;

    /// Creates an uninitialized input system. Queries fail until
    /// [`InputSystem::initialize`] runs.
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Takes `slot` as the snapshot storage and resets both halves to
    /// "nothing pressed, cursor at the origin".
    ///
    /// ## Errors
    /// [`ArenaError::SlotTooSmall`] if the slot is shorter than
    /// [`InputSystem::REQUIRED_BYTES`].
    pub fn initialize(&mut self, slot: ArenaSlot) -> Result<(), ArenaError> {
        slot.ensure_len(Self::REQUIRED_BYTES)?;
        slot.write(|bytes| bytes.fill(0));
        self.state = Some(slot);
        log::info!("Input subsystem initialized.");
        Ok(())
    }

    /// Releases the snapshot and returns to the uninitialized state.
    pub fn shutdown(&mut self) {
        if self.state.take().is_some() {
            log::info!("Input subsystem shut down.");
        }
    }

    /// Returns `true` once [`InputSystem::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Copies the current half into the previous half.
    ///
    /// Must run exactly once per simulated frame, after update and render.
    pub fn update(&mut self) {
        if let Some(slot) = self.state.as_ref() {
            slot.write(|bytes| {
                bytes.copy_within(span(KEYS_CURRENT, KEYBOARD_BYTES), KEYS_PREVIOUS);
                bytes.copy_within(span(MOUSE_CURRENT, MOUSE_BYTES), MOUSE_PREVIOUS);
            });
        }
    }

    /// Records a key transition and fires `KEY_PRESSED`/`KEY_RELEASED` on change.
    ///
    /// ## Returns
    /// `true` if the key state actually changed.
    pub fn process_key(&mut self, events: &EventBus, key: Key, pressed: bool) -> bool {
        let Some(slot) = self.state.as_ref() else {
            log::error!("Input system not initialized, dropping key {key}.");
            return false;
        };
        let Some(index) = key.index() else {
            log::warn!("Key code {key} is outside the keyboard table.");
            return false;
        };
        let changed = slot.write(|bytes| {
            let state = &mut bytes[KEYS_CURRENT + index];
            let changed = (*state != 0) != pressed;
            *state = u8::from(pressed);
            changed
        });
        if !changed {
            return false;
        }

        if key.is_modifier() {
            log::info!("{key} {}.", if pressed { "pressed" } else { "released" });
        }

        let code = if pressed {
            EventCode::KEY_PRESSED
        } else {
            EventCode::KEY_RELEASED
        };
        events.fire(code, None, EventContext::from_u16(key.0));
        true
    }

    /// Records a button transition and fires `BUTTON_PRESSED`/`BUTTON_RELEASED` on change.
    ///
    /// ## Returns
    /// `true` if the button state actually changed.
    pub fn process_button(&mut self, events: &EventBus, button: MouseButton, pressed: bool) -> bool {
        let Some(slot) = self.state.as_ref() else {
            log::error!("Input system not initialized, dropping {button:?} button.");
            return false;
        };
        let changed = slot.write(|bytes| {
            let state = &mut bytes[button_byte(Half::Current, button)];
            let changed = (*state != 0) != pressed;
            *state = u8::from(pressed);
            changed
        });
        if !changed {
            return false;
        }

        let code = if pressed {
            EventCode::BUTTON_PRESSED
        } else {
            EventCode::BUTTON_RELEASED
        };
        events.fire(code, None, EventContext::from_u16(button.code()));
        true
    }

    /// Records a cursor position and fires `MOUSE_MOVED` on change.
    ///
    /// ## Returns
    /// `true` if the position actually changed.
    pub fn process_mouse_move(&mut self, events: &EventBus, x: i16, y: i16) -> bool {
        let Some(slot) = self.state.as_ref() else {
            log::error!("Input system not initialized, dropping mouse move.");
            return false;
        };
        let changed = slot.write(|bytes| {
            if read_position(bytes, Half::Current) == (x, y) {
                return false;
            }
            bytes[span(MOUSE_CURRENT, 2)].copy_from_slice(&x.to_le_bytes());
            bytes[span(MOUSE_CURRENT + 2, 2)].copy_from_slice(&y.to_le_bytes());
            true
        });
        if !changed {
            return false;
        }

        events.fire(EventCode::MOUSE_MOVED, None, EventContext::position(x, y));
        true
    }

    /// Fires `MOUSE_WHEEL` for a non-zero delta. The wheel keeps no state.
    ///
    /// ## Returns
    /// `true` if an event was fired.
    pub fn process_mouse_wheel(&mut self, events: &EventBus, delta: i8) -> bool {
        if self.state.is_none() {
            log::error!("Input system not initialized, dropping wheel delta.");
            return false;
        }
        if delta == 0 {
            return false;
        }
        events.fire(EventCode::MOUSE_WHEEL, None, EventContext::wheel(delta));
        true
    }

    fn read<T: Default>(&self, what: &str, f: impl FnOnce(&[u8]) -> T) -> T {
        match self.state.as_ref() {
            Some(slot) => slot.read(f),
            None => {
                log::error!("Input system not initialized, {what} query answered with default.");
                T::default()
            }
        }
    }

    fn key_state(&self, key: Key, half: Half, down: bool) -> bool {
        self.read("key", |bytes| {
            key.index()
                .is_some_and(|i| (bytes[half.keys() + i] != 0) == down)
        })
    }

    fn button_state(&self, button: MouseButton, half: Half, down: bool) -> bool {
        self.read("button", |bytes| {
            (bytes[button_byte(half, button)] != 0) == down
        })
    }

    /// Whether `key` is down in the current half.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.key_state(key, Half::Current, true)
    }

    /// Whether `key` is up in the current half.
    pub fn is_key_up(&self, key: Key) -> bool {
        self.key_state(key, Half::Current, false)
    }

    /// Whether `key` was down at the last [`InputSystem::update`].
    pub fn was_key_down(&self, key: Key) -> bool {
        self.key_state(key, Half::Previous, true)
    }

    /// Whether `key` was up at the last [`InputSystem::update`].
    pub fn was_key_up(&self, key: Key) -> bool {
        self.key_state(key, Half::Previous, false)
    }

    /// Whether `button` is down in the current half.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.button_state(button, Half::Current, true)
    }

    /// Whether `button` is up in the current half.
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        self.button_state(button, Half::Current, false)
    }

    /// Whether `button` was down at the last [`InputSystem::update`].
    pub fn was_button_down(&self, button: MouseButton) -> bool {
        self.button_state(button, Half::Previous, true)
    }

    /// Whether `button` was up at the last [`InputSystem::update`].
    pub fn was_button_up(&self, button: MouseButton) -> bool {
        self.button_state(button, Half::Previous, false)
    }

    /// The current cursor position.
    pub fn mouse_position(&self) -> (i16, i16) {
        self.read("mouse position", |bytes| read_position(bytes, Half::Current))
    }

    /// The cursor position at the last [`InputSystem::update`].
    pub fn previous_mouse_position(&self) -> (i16, i16) {
        self.read("mouse position", |bytes| read_position(bytes, Half::Previous))
    }
}
