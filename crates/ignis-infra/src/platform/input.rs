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

//! Provides translation from a concrete windowing backend (`winit`) to the engine's platform events.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine from the
//! specific event format of the `winit` crate.

use ignis_core::input::{Key, MouseButton};
use ignis_core::platform::PlatformEvent;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates a `winit::event::WindowEvent` into the engine's [`PlatformEvent`] format.
///
/// Key repeats are dropped, since the input snapshot only records transitions.
///
/// # Arguments
///
/// * `event`: A reference to a `WindowEvent` from the `winit` library.
///
/// # Returns
///
/// Returns `Some(PlatformEvent)` if the event is something the engine reacts to, or `None` otherwise.
pub fn translate_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::Quit),
        WindowEvent::Destroyed => Some(PlatformEvent::Close),
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let PhysicalKey::Code(code) = key_event.physical_key else {
                return None;
            };
            let key = map_key_code(code)?;
            match key_event.state {
                ElementState::Pressed if !key_event.repeat => Some(PlatformEvent::Key {
                    key,
                    pressed: true,
                }),
                ElementState::Released => Some(PlatformEvent::Key {
                    key,
                    pressed: false,
                }),
                _ => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = clamp_cursor(*position);
            Some(PlatformEvent::MouseMove { x, y })
        }
        WindowEvent::MouseWheel { delta, .. } => flatten_wheel(delta).map(PlatformEvent::MouseWheel),
        WindowEvent::MouseInput { state, button, .. } => {
            map_mouse_button(*button).map(|button| PlatformEvent::Button {
                button,
                pressed: *state == ElementState::Pressed,
            })
        }
        _ => None,
    }
}

// --- Private Helper Functions ---

/// (Internal) Clamps a cursor position into the 16-bit range carried by mouse events.
fn clamp_cursor(position: PhysicalPosition<f64>) -> (i16, i16) {
    let clamp = |v: f64| v.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16;
    (clamp(position.x), clamp(position.y))
}

/// (Internal) Flattens a wheel delta to -1 or 1, ignoring horizontal scrolling.
fn flatten_wheel(delta: &MouseScrollDelta) -> Option<i8> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y < 0.0 {
        Some(-1)
    } else if y > 0.0 {
        Some(1)
    } else {
        None
    }
}

/// (Internal) Maps a `winit::event::MouseButton` to the engine's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// (Internal) Maps a physical `winit::keyboard::KeyCode` to the engine's virtual key code.
fn map_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Backspace => Key::BACKSPACE,
        KeyCode::Tab => Key::TAB,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::ENTER,
        KeyCode::Pause => Key::PAUSE,
        KeyCode::CapsLock => Key::CAPITAL,
        KeyCode::Escape => Key::ESCAPE,
        KeyCode::Space => Key::SPACE,
        KeyCode::PageUp => Key::PAGE_UP,
        KeyCode::PageDown => Key::PAGE_DOWN,
        KeyCode::End => Key::END,
        KeyCode::Home => Key::HOME,
        KeyCode::ArrowLeft => Key::LEFT,
        KeyCode::ArrowUp => Key::UP,
        KeyCode::ArrowRight => Key::RIGHT,
        KeyCode::ArrowDown => Key::DOWN,
        KeyCode::PrintScreen => Key::PRINT_SCREEN,
        KeyCode::Insert => Key::INSERT,
        KeyCode::Delete => Key::DELETE,

        KeyCode::Digit0 => return Key::digit(0),
        KeyCode::Digit1 => return Key::digit(1),
        KeyCode::Digit2 => return Key::digit(2),
        KeyCode::Digit3 => return Key::digit(3),
        KeyCode::Digit4 => return Key::digit(4),
        KeyCode::Digit5 => return Key::digit(5),
        KeyCode::Digit6 => return Key::digit(6),
        KeyCode::Digit7 => return Key::digit(7),
        KeyCode::Digit8 => return Key::digit(8),
        KeyCode::Digit9 => return Key::digit(9),

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::SuperLeft => Key::LWIN,
        KeyCode::SuperRight => Key::RWIN,

        KeyCode::Numpad0 => return Key::numpad(0),
        KeyCode::Numpad1 => return Key::numpad(1),
        KeyCode::Numpad2 => return Key::numpad(2),
        KeyCode::Numpad3 => return Key::numpad(3),
        KeyCode::Numpad4 => return Key::numpad(4),
        KeyCode::Numpad5 => return Key::numpad(5),
        KeyCode::Numpad6 => return Key::numpad(6),
        KeyCode::Numpad7 => return Key::numpad(7),
        KeyCode::Numpad8 => return Key::numpad(8),
        KeyCode::Numpad9 => return Key::numpad(9),
        KeyCode::NumpadMultiply => Key::MULTIPLY,
        KeyCode::NumpadAdd => Key::ADD,
        KeyCode::NumpadSubtract => Key::SUBTRACT,
        KeyCode::NumpadDecimal => Key::DECIMAL,
        KeyCode::NumpadDivide => Key::DIVIDE,

        KeyCode::F1 => return Key::function(1),
        KeyCode::F2 => return Key::function(2),
        KeyCode::F3 => return Key::function(3),
        KeyCode::F4 => return Key::function(4),
        KeyCode::F5 => return Key::function(5),
        KeyCode::F6 => return Key::function(6),
        KeyCode::F7 => return Key::function(7),
        KeyCode::F8 => return Key::function(8),
        KeyCode::F9 => return Key::function(9),
        KeyCode::F10 => return Key::function(10),
        KeyCode::F11 => return Key::function(11),
        KeyCode::F12 => return Key::function(12),
        KeyCode::F13 => return Key::function(13),
        KeyCode::F14 => return Key::function(14),
        KeyCode::F15 => return Key::function(15),
        KeyCode::F16 => return Key::function(16),
        KeyCode::F17 => return Key::function(17),
        KeyCode::F18 => return Key::function(18),
        KeyCode::F19 => return Key::function(19),
        KeyCode::F20 => return Key::function(20),
        KeyCode::F21 => return Key::function(21),
        KeyCode::F22 => return Key::function(22),
        KeyCode::F23 => return Key::function(23),
        KeyCode::F24 => return Key::function(24),

        KeyCode::NumLock => Key::NUMLOCK,
        KeyCode::ScrollLock => Key::SCROLL,

        KeyCode::ShiftLeft => Key::LSHIFT,
        KeyCode::ShiftRight => Key::RSHIFT,
        KeyCode::ControlLeft => Key::LCONTROL,
        KeyCode::ControlRight => Key::RCONTROL,
        KeyCode::AltLeft => Key::LALT,
        KeyCode::AltRight => Key::RALT,

        KeyCode::Semicolon => Key::SEMICOLON,
        KeyCode::Equal => Key::EQUAL,
        KeyCode::Comma => Key::COMMA,
        KeyCode::Minus => Key::MINUS,
        KeyCode::Period => Key::PERIOD,
        KeyCode::Slash => Key::SLASH,
        KeyCode::Backquote => Key::GRAVE,
        _ => return None,
    };
    Some(key)
}

// --- Unit Tests for Event Translation ---
#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    /// Letters, digits and function keys land on their virtual key codes
    #[test]
    fn test_map_key_code_ranges() {
        assert_eq!(map_key_code(KeyCode::KeyA), Some(Key::A));
        assert_eq!(map_key_code(KeyCode::KeyZ), Some(Key::Z));
        assert_eq!(map_key_code(KeyCode::Digit7), Some(Key(0x37)));
        assert_eq!(map_key_code(KeyCode::F1), Some(Key::F1));
        assert_eq!(map_key_code(KeyCode::F12), Some(Key::F12));
        assert_eq!(map_key_code(KeyCode::Numpad3), Some(Key(0x63)));
        assert_eq!(map_key_code(KeyCode::Escape), Some(Key::ESCAPE));
    }

    /// Left and right modifiers stay distinguishable
    #[test]
    fn test_map_key_code_modifiers() {
        assert_eq!(map_key_code(KeyCode::ShiftLeft), Some(Key::LSHIFT));
        assert_eq!(map_key_code(KeyCode::ShiftRight), Some(Key::RSHIFT));
        assert_eq!(map_key_code(KeyCode::ControlLeft), Some(Key::LCONTROL));
        assert_eq!(map_key_code(KeyCode::ControlRight), Some(Key::RCONTROL));
        assert_eq!(map_key_code(KeyCode::AltLeft), Some(Key::LALT));
        assert_eq!(map_key_code(KeyCode::AltRight), Some(Key::RALT));
    }

    /// Keys with no virtual code are dropped
    #[test]
    fn test_map_key_code_unmapped() {
        assert_eq!(map_key_code(KeyCode::MediaPlayPause), None);
    }

    /// Only the three tracked buttons are translated
    #[test]
    fn test_map_mouse_button() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_mouse_button(WinitMouseButton::Right), Some(MouseButton::Right));
        assert_eq!(map_mouse_button(WinitMouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_mouse_button(WinitMouseButton::Back), None);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(8)), None);
    }

    /// Wheel deltas are flattened to their sign
    #[test]
    fn test_flatten_wheel() {
        assert_eq!(flatten_wheel(&MouseScrollDelta::LineDelta(0.0, 3.0)), Some(1));
        assert_eq!(flatten_wheel(&MouseScrollDelta::LineDelta(0.0, -0.5)), Some(-1));
        assert_eq!(
            flatten_wheel(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))),
            Some(-1)
        );
        assert_eq!(flatten_wheel(&MouseScrollDelta::LineDelta(2.0, 0.0)), None);
    }

    /// Cursor positions outside the 16-bit range are clamped
    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(PhysicalPosition::new(100.7, 200.2)), (100, 200));
        assert_eq!(clamp_cursor(PhysicalPosition::new(-40_000.0, 90_000.0)), (i16::MIN, i16::MAX));
    }

    /// Window lifecycle events are translated without device information
    #[test]
    fn test_translate_window_events() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(PlatformEvent::Quit)
        );
        assert_eq!(
            translate_window_event(&WindowEvent::Destroyed),
            Some(PlatformEvent::Close)
        );
        assert_eq!(
            translate_window_event(&WindowEvent::Resized(PhysicalSize::new(800, 0))),
            Some(PlatformEvent::Resized {
                width: 800,
                height: 0
            })
        );
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
