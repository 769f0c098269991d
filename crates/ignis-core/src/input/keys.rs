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

use std::fmt;

/// A keyboard key, identified by its 16-bit virtual key code.
///
/// Only codes below [`Key::COUNT`] are tracked by the input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub u16);

#[allow(missing_docs)]
impl Key {
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const ENTER: Self = Self(0x0D);
    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const PAUSE: Self = Self(0x13);
    pub const CAPITAL: Self = Self(0x14);
    pub const ESCAPE: Self = Self(0x1B);
    pub const SPACE: Self = Self(0x20);
    pub const PAGE_UP: Self = Self(0x21);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT: Self = Self(0x25);
    pub const UP: Self = Self(0x26);
    pub const RIGHT: Self = Self(0x27);
    pub const DOWN: Self = Self(0x28);
    pub const PRINT_SCREEN: Self = Self(0x2C);
    pub const INSERT: Self = Self(0x2D);
    pub const DELETE: Self = Self(0x2E);

    pub const NUM_0: Self = Self(0x30);
    pub const NUM_9: Self = Self(0x39);

    pub const A: Self = Self(0x41);
    pub const B: Self = Self(0x42);
    pub const C: Self = Self(0x43);
    pub const D: Self = Self(0x44);
    pub const E: Self = Self(0x45);
    pub const F: Self = Self(0x46);
    pub const G: Self = Self(0x47);
    pub const H: Self = Self(0x48);
    pub const I: Self = Self(0x49);
    pub const J: Self = Self(0x4A);
    pub const K: Self = Self(0x4B);
    pub const L: Self = Self(0x4C);
    pub const M: Self = Self(0x4D);
    pub const N: Self = Self(0x4E);
    pub const O: Self = Self(0x4F);
    pub const P: Self = Self(0x50);
    pub const Q: Self = Self(0x51);
    pub const R: Self = Self(0x52);
    pub const S: Self = Self(0x53);
    pub const T: Self = Self(0x54);
    pub const U: Self = Self(0x55);
    pub const V: Self = Self(0x56);
    pub const W: Self = Self(0x57);
    pub const X: Self = Self(0x58);
    pub const Y: Self = Self(0x59);
    pub const Z: Self = Self(0x5A);

    pub const LWIN: Self = Self(0x5B);
    pub const RWIN: Self = Self(0x5C);

    pub const NUMPAD_0: Self = Self(0x60);
    pub const NUMPAD_9: Self = Self(0x69);
    pub const MULTIPLY: Self = Self(0x6A);
    pub const ADD: Self = Self(0x6B);
    pub const SUBTRACT: Self = Self(0x6D);
    pub const DECIMAL: Self = Self(0x6E);
    pub const DIVIDE: Self = Self(0x6F);

    pub const F1: Self = Self(0x70);
    pub const F12: Self = Self(0x7B);
    pub const F24: Self = Self(0x87);

    pub const NUMLOCK: Self = Self(0x90);
    pub const SCROLL: Self = Self(0x91);

    pub const LSHIFT: Self = Self(0xA0);
    pub const RSHIFT: Self = Self(0xA1);
    pub const LCONTROL: Self = Self(0xA2);
    pub const RCONTROL: Self = Self(0xA3);
    pub const LALT: Self = Self(0xA4);
    pub const RALT: Self = Self(0xA5);

    pub const SEMICOLON: Self = Self(0xBA);
    pub const EQUAL: Self = Self(0xBB);
    pub const COMMA: Self = Self(0xBC);
    pub const MINUS: Self = Self(0xBD);
    pub const PERIOD: Self = Self(0xBE);
    pub const SLASH: Self = Self(0xBF);
    pub const GRAVE: Self = Self(0xC0);
}

impl Key {
    /// Number of key slots in the keyboard table.
    pub const COUNT: usize = 256;

    /// Slot of this key in the keyboard table, if it has one.
    #[inline]
    pub fn index(self) -> Option<usize> {
        let index = usize::from(self.0);
        (index < Self::COUNT).then_some(index)
    }

    /// Digit keys `0` to `9` along the top row.
    pub fn digit(n: u8) -> Option<Self> {
        (n <= 9).then(|| Self(Self::NUM_0.0 + u16::from(n)))
    }

    /// Function keys `F1` to `F24`.
    pub fn function(n: u8) -> Option<Self> {
        (1..=24).contains(&n).then(|| Self(Self::F1.0 + u16::from(n) - 1))
    }

    /// Numeric keypad keys `0` to `9`.
    pub fn numpad(n: u8) -> Option<Self> {
        (n <= 9).then(|| Self(Self::NUMPAD_0.0 + u16::from(n)))
    }

    /// Returns `true` for the left/right shift, control and alt keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::LSHIFT | Self::RSHIFT | Self::LCONTROL | Self::RCONTROL | Self::LALT | Self::RALT
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ESCAPE => write!(f, "Escape"),
            Self::SPACE => write!(f, "Space"),
            Self::ENTER => write!(f, "Enter"),
            Self::LSHIFT => write!(f, "Left Shift"),
            Self::RSHIFT => write!(f, "Right Shift"),
            Self::LCONTROL => write!(f, "Left Control"),
            Self::RCONTROL => write!(f, "Right Control"),
            Self::LALT => write!(f, "Left Alt"),
            Self::RALT => write!(f, "Right Alt"),
            Self(code @ 0x30..=0x39) | Self(code @ 0x41..=0x5A) => {
                write!(f, "{}", char::from(code as u8))
            }
            Self(code) => write!(f, "0x{code:02X}"),
        }
    }
}

/// A mouse button tracked by the input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
}

impl MouseButton {
    /// Number of tracked buttons.
    pub const COUNT: usize = 3;

    /// Every tracked button, in slot order.
    pub const ALL: [Self; Self::COUNT] = [Self::Left, Self::Right, Self::Middle];

    /// Slot of the button in the button table.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }

    /// Code carried in the `u16[0]` slot of button events.
    #[inline]
    pub fn code(self) -> u16 {
        self.index() as u16
    }

    /// Inverse of [`MouseButton::code`].
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_index_respects_table_size() {
        assert_eq!(Key::ESCAPE.index(), Some(0x1B));
        assert_eq!(Key(255).index(), Some(255));
        assert_eq!(Key(256).index(), None);
    }

    #[test]
    fn key_ranges() {
        assert_eq!(Key::digit(9), Some(Key::NUM_9));
        assert_eq!(Key::digit(10), None);
        assert_eq!(Key::function(12), Some(Key::F12));
        assert_eq!(Key::function(24), Some(Key::F24));
        assert_eq!(Key::function(0), None);
        assert_eq!(Key::numpad(9), Some(Key::NUMPAD_9));
    }

    #[test]
    fn key_display() {
        assert_eq!(Key::A.to_string(), "A");
        assert_eq!(Key::digit(3).map(|k| k.to_string()), Some("3".to_string()));
        assert_eq!(Key::ESCAPE.to_string(), "Escape");
        assert_eq!(Key::F1.to_string(), "0x70");
    }

    #[test]
    fn button_codes_round_trip_for_every_button() {
        for button in MouseButton::ALL {
            assert_eq!(MouseButton::from_code(button.code()), Some(button));
        }
        assert_eq!(MouseButton::from_code(3), None);
    }
}
