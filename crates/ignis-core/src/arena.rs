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

//! A fixed-capacity bump allocator backing the engine subsystems.
//!
//! The [`Arena`] owns one contiguous block, created once at application start
//! and released only when the arena and every [`ArenaSlot`] carved from it are
//! dropped. Regions are carved sequentially with [`Arena::allocate`] and are
//! never returned individually. Subsystems with fixed-size state keep that
//! state inside their slot.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while carving regions out of an [`Arena`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The request does not fit in the space left after the cursor.
    #[error("arena capacity exceeded: requested {requested} bytes, {remaining} of {capacity} remaining")]
    CapacityExceeded {
        /// Size of the rejected request.
        requested: usize,
        /// Bytes still available when the request was made.
        remaining: usize,
        /// Total capacity of the arena.
        capacity: usize,
    },
    /// A slot is smaller than the state it is asked to hold.
    #[error("arena slot of {len} bytes cannot hold {required} bytes of state")]
    SlotTooSmall {
        /// Bytes the state needs.
        required: usize,
        /// Bytes the slot provides.
        len: usize,
    },
}

/// A sub-region handed out by [`Arena::allocate`].
///
/// The region is a placement token: it names a byte range inside the arena
/// block and stays valid for as long as the arena lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaRegion {
    offset: usize,
    len: usize,
}

impl ArenaRegion {
    /// Byte offset of the region from the start of the arena block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for a zero-sized region.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

type Block = Rc<RefCell<Box<[u8]>>>;

/// A bump allocator over a single pre-sized block.
pub struct Arena {
    block: Block,
    capacity: usize,
    cursor: usize,
}

impl Arena {
    /// Creates an arena owning a zeroed block of `capacity` bytes.
    ///
    /// ## Arguments
    /// * `capacity` - Total size of the block in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        log::trace!("Arena created with {capacity} bytes.");
        Self {
            block: Rc::new(RefCell::new(vec![0u8; capacity].into_boxed_slice())),
            capacity,
            cursor: 0,
        }
    }

    /// Total size of the block.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes still available after the cursor.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Carves the next `size` bytes from the block.
    ///
    /// ## Arguments
    /// * `size` - Number of bytes to reserve. Alignment is the caller's concern.
    ///
    /// ## Returns
    /// The reserved [`ArenaRegion`], or [`ArenaError::CapacityExceeded`] when
    /// the request does not fit. A failed request leaves the cursor untouched.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaRegion, ArenaError> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining,
                capacity: self.capacity,
            });
        }

        let region = ArenaRegion {
            offset: self.cursor,
            len: size,
        };
        self.cursor += size;
        log::trace!(
            "Arena allocated {size} bytes at offset {} ({} remaining).",
            region.offset,
            self.remaining()
        );
        Ok(region)
    }

    /// Carves the next `size` bytes and returns a slot owning access to them.
    pub fn allocate_slot(&mut self, size: usize) -> Result<ArenaSlot, ArenaError> {
        let region = self.allocate(size)?;
        Ok(ArenaSlot {
            block: Rc::clone(&self.block),
            region,
        })
    }

    /// Read access to the bytes of a region.
    ///
    /// Returns `None` if the region was not produced by this arena.
    pub fn bytes(&self, region: ArenaRegion) -> Option<Ref<'_, [u8]>> {
        if region.end() > self.cursor {
            return None;
        }
        Ref::filter_map(self.block.borrow(), |block| {
            block.get(region.offset..region.end())
        })
        .ok()
    }

    /// Write access to the bytes of a region.
    pub fn bytes_mut(&mut self, region: ArenaRegion) -> Option<RefMut<'_, [u8]>> {
        if region.end() > self.cursor {
            return None;
        }
        RefMut::filter_map(self.block.borrow_mut(), |block| {
            block.get_mut(region.offset..region.end())
        })
        .ok()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.cursor)
            .finish()
    }
}

/// Access to one carved region of an [`Arena`] block.
///
/// The slot keeps the block alive, so a subsystem can hold its state in the
/// arena without borrowing the arena itself. Accessors must not be nested.
pub struct ArenaSlot {
    block: Block,
    region: ArenaRegion,
}

impl ArenaSlot {
    /// Where this slot sits in the block.
    pub fn region(&self) -> ArenaRegion {
        self.region
    }

    /// Length of the slot in bytes.
    pub fn len(&self) -> usize {
        self.region.len
    }

    /// Returns `true` for a zero-sized slot.
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Fails with [`ArenaError::SlotTooSmall`] unless the slot holds `required` bytes.
    pub fn ensure_len(&self, required: usize) -> Result<(), ArenaError> {
        if self.region.len < required {
            return Err(ArenaError::SlotTooSmall {
                required,
                len: self.region.len,
            });
        }
        Ok(())
    }

    /// Runs `f` over the slot's bytes.
    pub fn read<T>(&self, f: impl FnOnce(&[u8]) -> T) -> T {
        let block = self.block.borrow();
        f(&block[self.region.offset..self.region.end()])
    }

    /// Runs `f` over the slot's bytes, mutably.
    pub fn write<T>(&self, f: impl FnOnce(&mut [u8]) -> T) -> T {
        let mut block = self.block.borrow_mut();
        f(&mut block[self.region.offset..self.region.end()])
    }
}

impl fmt::Debug for ArenaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaSlot")
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_sequential() {
        let mut arena = Arena::with_capacity(64);
        let a = arena.allocate(16).expect("first allocation should fit");
        let b = arena.allocate(8).expect("second allocation should fit");

        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 16);
        assert_eq!(arena.used(), 24);
        assert_eq!(arena.remaining(), 40);
    }

    #[test]
    fn exact_fit_is_accepted() {
        let mut arena = Arena::with_capacity(32);
        arena.allocate(32).expect("exact fit should succeed");
        assert_eq!(arena.remaining(), 0);
        assert!(arena.allocate(0).is_ok(), "zero-sized requests always fit");
    }

    #[test]
    fn overflow_is_rejected_without_moving_the_cursor() {
        let mut arena = Arena::with_capacity(10);
        arena.allocate(6).expect("first allocation should fit");

        let err = arena.allocate(5).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 5,
                remaining: 4,
                capacity: 10,
            }
        );
        assert_eq!(arena.used(), 6, "a failed allocation must not advance the cursor");
    }

    #[test]
    fn region_bytes_are_writable_and_isolated() {
        let mut arena = Arena::with_capacity(8);
        let a = arena.allocate(4).unwrap();
        let b = arena.allocate(4).unwrap();

        arena.bytes_mut(a).unwrap().fill(0xAB);
        assert_eq!(&*arena.bytes(a).unwrap(), &[0xAB; 4]);
        assert_eq!(&*arena.bytes(b).unwrap(), &[0; 4]);
    }

    #[test]
    fn foreign_regions_are_rejected() {
        let mut big = Arena::with_capacity(128);
        let region = big.allocate(100).unwrap();
        let small = Arena::with_capacity(16);
        assert!(small.bytes(region).is_none());
    }

    #[test]
    fn slots_write_through_to_the_block() {
        let mut arena = Arena::with_capacity(16);
        arena.allocate(4).unwrap();
        let slot = arena.allocate_slot(8).unwrap();
        assert_eq!(slot.region().offset(), 4);

        slot.write(|bytes| bytes[0] = 7);
        assert_eq!(slot.read(|bytes| bytes[0]), 7);
        assert_eq!(arena.bytes(slot.region()).unwrap()[0], 7);
        assert_eq!(arena.used(), 12);
    }

    #[test]
    fn slot_outlives_the_arena_handle() {
        let slot = Arena::with_capacity(4).allocate_slot(4).unwrap();
        slot.write(|bytes| bytes.fill(1));
        assert_eq!(slot.read(|bytes| bytes.to_vec()), vec![1; 4]);
    }

    #[test]
    fn short_slot_is_rejected() {
        let slot = Arena::with_capacity(4).allocate_slot(2).unwrap();
        assert_eq!(
            slot.ensure_len(3),
            Err(ArenaError::SlotTooSmall { required: 3, len: 2 })
        );
        assert!(slot.ensure_len(2).is_ok());
    }
}
