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

//! Tagged memory accounting.
//!
//! The [`MemorySystem`] does not allocate anything itself. Subsystems report
//! what they take and give back under a [`MemoryTag`], and the totals feed a
//! human-readable usage report logged when the frame loop starts.

use crate::arena::{ArenaError, ArenaSlot};
use std::fmt::Write as _;

/// Category under which an allocation is accounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MemoryTag {
    /// Placeholder for allocations that have not been categorized yet.
    Unknown,
    Array,
    LinearAllocator,
    DArray,
    Dict,
    RingQueue,
    Bst,
    String,
    Application,
    Job,
    Texture,
    MaterialInstance,
    Renderer,
    Game,
    Transform,
    Entity,
    EntityNode,
    Scene,
}

impl MemoryTag {
    /// Number of tags.
    pub const COUNT: usize = 18;

    /// Every tag, in report order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Unknown,
        Self::Array,
        Self::LinearAllocator,
        Self::DArray,
        Self::Dict,
        Self::RingQueue,
        Self::Bst,
        Self::String,
        Self::Application,
        Self::Job,
        Self::Texture,
        Self::MaterialInstance,
        Self::Renderer,
        Self::Game,
        Self::Transform,
        Self::Entity,
        Self::EntityNode,
        Self::Scene,
    ];

    /// Label used in the usage report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Array => "ARRAY",
            Self::LinearAllocator => "LINEAR_ALLOC",
            Self::DArray => "DARRAY",
            Self::Dict => "DICT",
            Self::RingQueue => "RING_QUEUE",
            Self::Bst => "BST",
            Self::String => "STRING",
            Self::Application => "APPLICATION",
            Self::Job => "JOB",
            Self::Texture => "TEXTURE",
            Self::MaterialInstance => "MAT_INST",
            Self::Renderer => "RENDERER",
            Self::Game => "GAME",
            Self::Transform => "TRANSFORM",
            Self::Entity => "ENTITY",
            Self::EntityNode => "ENTITY_NODE",
            Self::Scene => "SCENE",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Formats a byte count with the largest fitting binary unit and two decimals.
pub fn format_bytes(bytes: u64) -> String {
    let (value, unit) = if bytes >= GIB {
        (bytes as f64 / GIB as f64, "GiB")
    } else if bytes >= MIB {
        (bytes as f64 / MIB as f64, "MiB")
    } else if bytes >= KIB {
        (bytes as f64 / KIB as f64, "KiB")
    } else {
        (bytes as f64, "B")
    };
    format!("{value:.2}{unit}")
}

const WORD: usize = std::mem::size_of::<u64>();
const TOTAL_WORD: usize = 0;
const COUNT_WORD: usize = 1;
const TAGGED_WORD: usize = 2;

fn load(bytes: &[u8], word: usize) -> u64 {
    let mut raw = [0u8; WORD];
    raw.copy_from_slice(&bytes[word * WORD..(word + 1) * WORD]);
    u64::from_le_bytes(raw)
}

fn store(bytes: &mut [u8], word: usize, value: u64) {
    bytes[word * WORD..(word + 1) * WORD].copy_from_slice(&value.to_le_bytes());
}

/// Running totals of tagged allocations, kept in an arena slot.
///
/// The slot holds little-endian `u64` words: the total, the allocation
/// count, then one word per tag in [`MemoryTag::ALL`] order.
#[derive(Debug)]
pub struct MemorySystem {
    slot: ArenaSlot,
}

impl MemorySystem {
    /// Arena bytes needed for the counters.
    pub const REQUIRED_BYTES: usize = (TAGGED_WORD + MemoryTag::COUNT) * WORD;

    /// Creates an empty accounting table stored in `slot`.
    ///
    /// ## Errors
    /// [`ArenaError::SlotTooSmall`] if the slot is shorter than
    /// [`MemorySystem::REQUIRED_BYTES`].
    pub fn new(slot: ArenaSlot) -> Result<Self, ArenaError> {
        slot.ensure_len(Self::REQUIRED_BYTES)?;
        slot.write(|bytes| bytes.fill(0));
        Ok(Self { slot })
    }

    /// Accounts `size` bytes under `tag`.
    pub fn record_allocation(&mut self, size: u64, tag: MemoryTag) {
        if tag == MemoryTag::Unknown {
            log::warn!("Allocation of {size} bytes recorded as UNKNOWN, re-tag this allocation.");
        }
        self.slot.write(|bytes| {
            store(bytes, TOTAL_WORD, load(bytes, TOTAL_WORD).saturating_add(size));
            let tagged = TAGGED_WORD + tag.slot();
            store(bytes, tagged, load(bytes, tagged).saturating_add(size));
            store(bytes, COUNT_WORD, load(bytes, COUNT_WORD) + 1);
        });
    }

    /// Releases `size` bytes previously accounted under `tag`.
    pub fn record_free(&mut self, size: u64, tag: MemoryTag) {
        if tag == MemoryTag::Unknown {
            log::warn!("Free of {size} bytes recorded as UNKNOWN, re-tag this allocation.");
        }
        self.slot.write(|bytes| {
            store(bytes, TOTAL_WORD, load(bytes, TOTAL_WORD).saturating_sub(size));
            let tagged = TAGGED_WORD + tag.slot();
            store(bytes, tagged, load(bytes, tagged).saturating_sub(size));
        });
    }

    /// Bytes currently accounted across every tag.
    pub fn total_allocated(&self) -> u64 {
        self.slot.read(|bytes| load(bytes, TOTAL_WORD))
    }

    /// Bytes currently accounted under `tag`.
    pub fn tagged(&self, tag: MemoryTag) -> u64 {
        self.slot.read(|bytes| load(bytes, TAGGED_WORD + tag.slot()))
    }

    /// Number of allocations recorded since creation.
    pub fn allocation_count(&self) -> u64 {
        self.slot.read(|bytes| load(bytes, COUNT_WORD))
    }

    /// A multi-line report of per-tag usage.
    pub fn usage_report(&self) -> String {
        let mut report = String::from("System memory use (tagged):\n");
        for tag in MemoryTag::ALL {
            // Writing into a String cannot fail.
            let _ = writeln!(
                report,
                "  {:<12}: {}",
                tag.label(),
                format_bytes(self.tagged(tag))
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    fn memory() -> MemorySystem {
        let slot = Arena::with_capacity(MemorySystem::REQUIRED_BYTES)
            .allocate_slot(MemorySystem::REQUIRED_BYTES)
            .expect("counters should fit");
        MemorySystem::new(slot).expect("slot should hold the counters")
    }

    #[test]
    fn tag_slots_match_report_order() {
        for (i, tag) in MemoryTag::ALL.iter().enumerate() {
            assert_eq!(tag.slot(), i);
        }
    }

    #[test]
    fn format_bytes_picks_largest_unit() {
        assert_eq!(format_bytes(512), "512.00B");
        assert_eq!(format_bytes(1536), "1.50KiB");
        assert_eq!(format_bytes(64 * MIB), "64.00MiB");
        assert_eq!(format_bytes(3 * GIB), "3.00GiB");
    }

    #[test]
    fn allocations_and_frees_are_tracked_per_tag() {
        let mut memory = memory();
        memory.record_allocation(100, MemoryTag::Game);
        memory.record_allocation(50, MemoryTag::Renderer);
        memory.record_free(40, MemoryTag::Game);

        assert_eq!(memory.total_allocated(), 110);
        assert_eq!(memory.tagged(MemoryTag::Game), 60);
        assert_eq!(memory.tagged(MemoryTag::Renderer), 50);
        assert_eq!(memory.allocation_count(), 2);
    }

    #[test]
    fn frees_never_underflow() {
        let mut memory = memory();
        memory.record_free(10, MemoryTag::Array);
        assert_eq!(memory.total_allocated(), 0);
        assert_eq!(memory.tagged(MemoryTag::Array), 0);
    }

    #[test]
    fn usage_report_lists_every_tag() {
        let mut memory = memory();
        memory.record_allocation(64 * MIB, MemoryTag::LinearAllocator);
        let report = memory.usage_report();

        assert!(report.starts_with("System memory use (tagged):"));
        assert_eq!(report.lines().count(), MemoryTag::COUNT + 1);
        assert!(report.contains("LINEAR_ALLOC: 64.00MiB"));
        assert!(report.contains("SCENE       : 0.00B"));
    }

    #[test]
    fn counters_live_in_the_slot() {
        let mut arena = Arena::with_capacity(MemorySystem::REQUIRED_BYTES);
        let slot = arena.allocate_slot(MemorySystem::REQUIRED_BYTES).unwrap();
        let region = slot.region();
        let mut memory = MemorySystem::new(slot).unwrap();
        memory.record_allocation(0x0102, MemoryTag::Texture);

        let bytes = arena.bytes(region).unwrap();
        assert_eq!(load(&bytes, TOTAL_WORD), 0x0102);
        assert_eq!(load(&bytes, COUNT_WORD), 1);
        assert_eq!(load(&bytes, TAGGED_WORD + MemoryTag::Texture.slot()), 0x0102);
    }

    #[test]
    fn short_slot_is_refused() {
        let slot = Arena::with_capacity(8).allocate_slot(8).unwrap();
        assert_eq!(
            MemorySystem::new(slot).err(),
            Some(ArenaError::SlotTooSmall {
                required: MemorySystem::REQUIRED_BYTES,
                len: 8
            })
        );
    }
}
