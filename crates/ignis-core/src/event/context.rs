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

/// A 16-byte payload carried alongside an event.
///
/// Each variant is one typed view of the same fixed-size slot. Listeners read
/// the view they expect with the `as_*` accessors, which return `None` when
/// the sender packed a different view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EventContext {
    /// No payload.
    #[default]
    None,
    /// Two signed 64-bit slots.
    I64([i64; 2]),
    /// Two unsigned 64-bit slots.
    U64([u64; 2]),
    /// Two 64-bit float slots.
    F64([f64; 2]),
    /// Four signed 32-bit slots.
    I32([i32; 4]),
    /// Four unsigned 32-bit slots.
    U32([u32; 4]),
    /// Four 32-bit float slots.
    F32([f32; 4]),
    /// Eight signed 16-bit slots.
    I16([i16; 8]),
    /// Eight unsigned 16-bit slots.
    U16([u16; 8]),
    /// Sixteen signed 8-bit slots.
    I8([i8; 16]),
    /// Sixteen unsigned 8-bit slots.
    U8([u8; 16]),
}

impl EventContext {
    /// Packs a single 16-bit value, as used for key and button codes.
    pub fn from_u16(value: u16) -> Self {
        let mut slots = [0u16; 8];
        slots[0] = value;
        Self::U16(slots)
    }

    /// Packs a viewport size.
    pub fn resize(width: u16, height: u16) -> Self {
        let mut slots = [0u16; 8];
        slots[0] = width;
        slots[1] = height;
        Self::U16(slots)
    }

    /// Packs a cursor position.
    pub fn position(x: i16, y: i16) -> Self {
        let mut slots = [0i16; 8];
        slots[0] = x;
        slots[1] = y;
        Self::I16(slots)
    }

    /// Packs a wheel delta.
    pub fn wheel(delta: i8) -> Self {
        let mut slots = [0i8; 16];
        slots[0] = delta;
        Self::I8(slots)
    }

    /// The unsigned 16-bit view.
    pub fn as_u16(&self) -> Option<&[u16; 8]> {
        match self {
            Self::U16(v) => Some(v),
            _ => None,
        }
    }

    /// The signed 16-bit view.
    pub fn as_i16(&self) -> Option<&[i16; 8]> {
        match self {
            Self::I16(v) => Some(v),
            _ => None,
        }
    }

    /// The signed 8-bit view.
    pub fn as_i8(&self) -> Option<&[i8; 16]> {
        match self {
            Self::I8(v) => Some(v),
            _ => None,
        }
    }

    /// The unsigned 8-bit view.
    pub fn as_u8(&self) -> Option<&[u8; 16]> {
        match self {
            Self::U8(v) => Some(v),
            _ => None,
        }
    }

    /// The signed 32-bit view.
    pub fn as_i32(&self) -> Option<&[i32; 4]> {
        match self {
            Self::I32(v) => Some(v),
            _ => None,
        }
    }

    /// The unsigned 32-bit view.
    pub fn as_u32(&self) -> Option<&[u32; 4]> {
        match self {
            Self::U32(v) => Some(v),
            _ => None,
        }
    }

    /// The 32-bit float view.
    pub fn as_f32(&self) -> Option<&[f32; 4]> {
        match self {
            Self::F32(v) => Some(v),
            _ => None,
        }
    }

    /// The signed 64-bit view.
    pub fn as_i64(&self) -> Option<&[i64; 2]> {
        match self {
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// The unsigned 64-bit view.
    pub fn as_u64(&self) -> Option<&[u64; 2]> {
        match self {
            Self::U64(v) => Some(v),
            _ => None,
        }
    }

    /// The 64-bit float view.
    pub fn as_f64(&self) -> Option<&[f64; 2]> {
        match self {
            Self::F64(v) => Some(v),
            _ => None,
        }
    }
}
