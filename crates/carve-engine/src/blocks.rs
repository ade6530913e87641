//! The ordered block partition of the arena.
//!
//! [`BlockList`] stores the arena as an ordered run of [`Block`]s whose
//! sizes always sum to the capacity. Offsets are not stored — each
//! block's offset is the sum of the sizes before it, which makes
//! overlap and gaps unrepresentable by construction. The two invariants
//! the representation cannot enforce structurally (no zero-size block,
//! no two adjacent free blocks) are maintained by the mutation methods
//! and checkable via [`BlockList::verify_partition`].

use carve_core::ProcessId;
use smallvec::{smallvec, SmallVec};

/// One contiguous run of the arena, free or owned by a process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    size: u32,
    owner: Option<ProcessId>,
}

impl Block {
    fn free(size: u32) -> Self {
        Self { size, owner: None }
    }

    /// Size of the block in units. Always ≥ 1.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The owning process, or `None` for a free block.
    pub fn owner(&self) -> Option<&ProcessId> {
        self.owner.as_ref()
    }

    /// Whether the block is free.
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }
}

/// A free block candidate handed to the placement strategies.
///
/// `index` addresses the block within the list; `offset` and `size`
/// are copied out so strategies can select without re-walking the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeSpan {
    /// Position of the block in the list.
    pub index: usize,
    /// Start address of the block.
    pub offset: u32,
    /// Size of the block in units.
    pub size: u32,
}

/// The ordered partition of the arena.
///
/// Real layouts rarely exceed a handful of blocks, so the list lives
/// inline until it outgrows 8 entries.
pub struct BlockList {
    capacity: u32,
    blocks: SmallVec<[Block; 8]>,
}

impl BlockList {
    /// A partition with a single free block covering the whole arena.
    pub fn new(capacity: u32) -> Self {
        debug_assert!(capacity >= 1, "capacity validated by EngineConfig");
        Self {
            capacity,
            blocks: smallvec![Block::free(capacity)],
        }
    }

    /// Total arena capacity in units.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of blocks in the partition.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false — a partition has at least one block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate blocks in offset order as `(offset, block)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Block)> + '_ {
        let mut offset = 0u32;
        self.blocks.iter().map(move |block| {
            let at = offset;
            offset += block.size;
            (at, block)
        })
    }

    /// The free blocks in offset order, as placement candidates.
    pub fn free_spans(&self) -> Vec<FreeSpan> {
        let mut spans = Vec::new();
        let mut offset = 0u32;
        for (index, block) in self.blocks.iter().enumerate() {
            if block.is_free() {
                spans.push(FreeSpan {
                    index,
                    offset,
                    size: block.size,
                });
            }
            offset += block.size;
        }
        spans
    }

    /// Sum of free block sizes.
    pub fn total_free(&self) -> u32 {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .sum()
    }

    /// Sum of allocated block sizes.
    pub fn total_allocated(&self) -> u32 {
        self.capacity - self.total_free()
    }

    /// Size of the largest free block, 0 when fully allocated.
    pub fn largest_free(&self) -> u32 {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    /// Number of free blocks.
    pub fn free_block_count(&self) -> u32 {
        self.blocks.iter().filter(|b| b.is_free()).count() as u32
    }

    /// Find the block owned by `process_id`.
    ///
    /// Returns `(index, offset, size)` if a block carries the owner.
    pub fn find_owner(&self, process_id: &ProcessId) -> Option<(usize, u32, u32)> {
        let mut offset = 0u32;
        for (index, block) in self.blocks.iter().enumerate() {
            if block.owner.as_ref() == Some(process_id) {
                return Some((index, offset, block.size));
            }
            offset += block.size;
        }
        None
    }

    /// Carve `size` units for `owner` from the start of the free block
    /// at `index`.
    ///
    /// An exact-size fit converts the block in place; a larger block is
    /// split into an allocated prefix and a free remainder at the
    /// immediately following offset. Returns `(offset, split)` where
    /// `split` reports whether a remainder block was created.
    ///
    /// The caller must pass a free block at least `size` units large —
    /// placement guarantees this.
    pub fn allocate_at(&mut self, index: usize, size: u32, owner: ProcessId) -> (u32, bool) {
        debug_assert!(self.blocks[index].is_free());
        debug_assert!(size >= 1 && size <= self.blocks[index].size);

        let offset: u32 = self.blocks[..index].iter().map(|b| b.size).sum();
        let old_size = self.blocks[index].size;
        self.blocks[index] = Block {
            size,
            owner: Some(owner),
        };
        let split = old_size > size;
        if split {
            self.blocks.insert(index + 1, Block::free(old_size - size));
        }
        debug_assert!(self.verify_partition().is_ok());
        (offset, split)
    }

    /// Free the block at `index` and merge any adjacent free blocks.
    ///
    /// Returns the number of merges performed (0, 1, or 2).
    pub fn release_at(&mut self, index: usize) -> u32 {
        self.blocks[index].owner = None;
        let merges = self.coalesce_free();
        debug_assert!(self.verify_partition().is_ok());
        merges
    }

    /// Merge every run of adjacent free blocks into a single block.
    ///
    /// Idempotent: a second invocation finds no adjacent free pair and
    /// merges nothing. Returns the number of merges performed.
    pub fn coalesce_free(&mut self) -> u32 {
        let mut merges = 0u32;
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let absorbed = self.blocks.remove(i + 1);
                self.blocks[i].size += absorbed.size;
                merges += 1;
            } else {
                i += 1;
            }
        }
        merges
    }

    /// Discard all blocks and reinitialize to the single-free-block
    /// state.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.blocks.push(Block::free(self.capacity));
    }

    /// Check the partition invariants the representation cannot enforce
    /// structurally: every block has size ≥ 1, sizes sum to the
    /// capacity, and no two adjacent blocks are both free.
    ///
    /// Ordering, contiguity, and non-overlap hold by construction —
    /// offsets are derived from list position.
    pub fn verify_partition(&self) -> Result<(), String> {
        if self.blocks.is_empty() {
            return Err("partition has no blocks".to_string());
        }
        let mut sum = 0u64;
        for block in &self.blocks {
            if block.size == 0 {
                return Err("zero-size block in partition".to_string());
            }
            sum += u64::from(block.size);
        }
        if sum != u64::from(self.capacity) {
            return Err(format!(
                "block sizes sum to {sum}, capacity is {}",
                self.capacity
            ));
        }
        for pair in self.blocks.windows(2) {
            if pair[0].is_free() && pair[1].is_free() {
                return Err("two adjacent free blocks".to_string());
            }
        }
        Ok(())
    }
}
