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

/// Identifies a category of notification on the [`EventBus`](super::EventBus).
///
/// Codes up to [`EventCode::MAX_ENGINE_CODE`] are reserved for the engine.
/// Applications should define their own codes above that value and below
/// [`EventCode::LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCode(pub u16);

impl EventCode {
    /// Shuts the application down on the next frame.
    pub const APPLICATION_QUIT: Self = Self(0x01);
    /// A keyboard key went down. Context: `u16[0]` holds the key code.
    pub const KEY_PRESSED: Self = Self(0x02);
    /// A keyboard key went up. Context: `u16[0]` holds the key code.
    pub const KEY_RELEASED: Self = Self(0x03);
    /// A mouse button went down. Context: `u16[0]` holds the button.
    pub const BUTTON_PRESSED: Self = Self(0x04);
    /// A mouse button went up. Context: `u16[0]` holds the button.
    pub const BUTTON_RELEASED: Self = Self(0x05);
    /// The cursor moved. Context: `i16[0]` is x, `i16[1]` is y.
    pub const MOUSE_MOVED: Self = Self(0x06);
    /// The wheel turned. Context: `i8[0]` is the flattened delta.
    pub const MOUSE_WHEEL: Self = Self(0x07);
    /// The viewport changed size. Context: `u16[0]` is width, `u16[1]` is height.
    pub const RESIZED: Self = Self(0x08);

    /// Highest code reserved for the engine itself.
    pub const MAX_ENGINE_CODE: Self = Self(0xFF);

    /// Exclusive upper bound of the valid code range.
    pub const LIMIT: u16 = 16384;

    /// Returns `true` if the code lies inside the bus's valid range.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < Self::LIMIT
    }

    /// Returns `true` for codes reserved to the engine.
    #[inline]
    pub fn is_engine_code(self) -> bool {
        self <= Self::MAX_ENGINE_CODE
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::APPLICATION_QUIT => write!(f, "APPLICATION_QUIT"),
            Self::KEY_PRESSED => write!(f, "KEY_PRESSED"),
            Self::KEY_RELEASED => write!(f, "KEY_RELEASED"),
            Self::BUTTON_PRESSED => write!(f, "BUTTON_PRESSED"),
            Self::BUTTON_RELEASED => write!(f, "BUTTON_RELEASED"),
            Self::MOUSE_MOVED => write!(f, "MOUSE_MOVED"),
            Self::MOUSE_WHEEL => write!(f, "MOUSE_WHEEL"),
            Self::RESIZED => write!(f, "RESIZED"),
            Self(raw) => write!(f, "0x{raw:04X}"),
        }
    }
}
