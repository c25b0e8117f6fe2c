// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! 2-way set-associative data cache
//!
//! # Organization
//!
//! - **Sets**: 8, selected by immediate bits [4:2]
//! - **Ways**: 2 blocks per set
//! - **Block size**: 1 word
//! - **Replacement**: LRU via one history flag per block
//!
//! ```text
//! Set i:  [ Block 0 | V | H | Tag | Data ]  [ Block 1 | V | H | Tag | Data ]
//! ```
//!
//! A set starts cold: both blocks invalid with no recency order. The first
//! victim selection in a cold set picks block 0 and marks block 1 as next in
//! line, so the order is defined from the first touch onward. After any
//! completed access exactly one block is MRU and the other LRU.
//!
//! The cache only stores state. Hit/miss handling, write-back and the
//! store policy live in the access engine.
//!
//! # Example
//!
//! ```
//! use cachesim::core::cache::{Cache, Recency};
//!
//! let mut cache = Cache::new();
//! assert_eq!(cache.lookup(2, 1), None);
//!
//! let victim = cache.select_victim(2);
//! assert_eq!(victim, 0); // cold start
//! cache.install(2, victim, 1, 15);
//! cache.update_recency(2, victim);
//!
//! assert_eq!(cache.lookup(2, 1), Some(0));
//! assert_eq!(cache.block(2, 0).recency, Recency::Mru);
//! assert_eq!(cache.block(2, 1).recency, Recency::Lru);
//! ```

use serde::Serialize;
use std::fmt;

#[cfg(test)]
mod tests;

/// Number of sets
pub const NUM_SETS: usize = 8;

/// Blocks per set
pub const WAYS: usize = 2;

/// Recency flag of a block within its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Recency {
    /// Set has not been touched yet
    #[default]
    Cold,
    /// Most recently used
    Mru,
    /// Least recently used (next victim)
    Lru,
}

impl fmt::Display for Recency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recency::Cold => "-",
            Recency::Mru => "MRU",
            Recency::Lru => "LRU",
        })
    }
}

/// A single cache block
///
/// Each block stores:
/// - **valid**: whether `tag`/`data` describe a memory word
/// - **recency**: MRU/LRU order within the set
/// - **tag**: immediate bits [8:5] of the cached address
/// - **data**: the cached word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheBlock {
    /// Valid bit
    pub valid: bool,
    /// History flag
    pub recency: Recency,
    /// Address tag (4 bits)
    pub tag: u8,
    /// Cached word
    pub data: u32,
}

impl CacheBlock {
    /// Create a new invalid block
    #[inline(always)]
    const fn new() -> Self {
        Self {
            valid: false,
            recency: Recency::Cold,
            tag: 0,
            data: 0,
        }
    }
}

/// Two blocks sharing a set index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheSet {
    blocks: [CacheBlock; WAYS],
}

impl CacheSet {
    const fn new() -> Self {
        Self {
            blocks: [CacheBlock::new(); WAYS],
        }
    }

    /// Blocks in way order
    pub fn blocks(&self) -> &[CacheBlock; WAYS] {
        &self.blocks
    }

    /// True until the first access to this set
    pub fn is_cold(&self) -> bool {
        self.blocks.iter().all(|b| b.recency == Recency::Cold)
    }

    /// True when one block is MRU and the other LRU
    pub fn is_ordered(&self) -> bool {
        matches!(
            (self.blocks[0].recency, self.blocks[1].recency),
            (Recency::Mru, Recency::Lru) | (Recency::Lru, Recency::Mru)
        )
    }
}

/// 2-way set-associative data cache
///
/// # Performance Characteristics
///
/// - **Lookup**: O(1) - two tag compares
/// - **Victim selection**: O(1) - read two history flags
/// - **Install / recency update**: O(1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Create a cache with every set cold
    pub fn new() -> Self {
        Self {
            sets: vec![CacheSet::new(); NUM_SETS],
        }
    }

    /// Return every set to the cold state
    pub fn reset(&mut self) {
        self.sets.fill(CacheSet::new());
    }

    /// Find the valid block holding `tag`
    ///
    /// Block 0 is checked before block 1. No side effects.
    ///
    /// # Returns
    ///
    /// - `Some(block)` on a hit
    /// - `None` on a miss
    #[inline(always)]
    pub fn lookup(&self, index: usize, tag: u8) -> Option<usize> {
        self.sets[index]
            .blocks
            .iter()
            .position(|b| b.valid && b.tag == tag)
    }

    /// Pick the block to replace in a set
    ///
    /// In a cold set this returns block 0 and marks block 1 LRU, which
    /// establishes the recency order. Otherwise the LRU block is returned.
    ///
    /// # Panics
    ///
    /// If the set holds any recency combination other than cold or
    /// MRU/LRU. That state is unreachable through the public API and means
    /// the cache model itself is broken.
    pub fn select_victim(&mut self, index: usize) -> usize {
        let set = &mut self.sets[index];
        match (set.blocks[0].recency, set.blocks[1].recency) {
            (Recency::Cold, Recency::Cold) => {
                set.blocks[1].recency = Recency::Lru;
                0
            }
            (Recency::Lru, Recency::Mru) => 0,
            (Recency::Mru, Recency::Lru) => 1,
            (h0, h1) => panic!(
                "cache invariant violated: set {} has recency ({:?}, {:?})",
                index, h0, h1
            ),
        }
    }

    /// Mark `block` MRU and its sibling LRU
    ///
    /// Called once per access that touches a block, after the block's
    /// contents reach their post-access values.
    #[inline(always)]
    pub fn update_recency(&mut self, index: usize, block: usize) {
        debug_assert!(block < WAYS);
        let set = &mut self.sets[index];
        set.blocks[block].recency = Recency::Mru;
        set.blocks[block ^ 1].recency = Recency::Lru;
        assert!(
            set.is_ordered(),
            "cache invariant violated: set {} unordered after access",
            index
        );
    }

    /// Fill a block with a new tag and word and mark it valid
    ///
    /// Recency is left alone; the caller follows up with
    /// [`Cache::update_recency`].
    #[inline(always)]
    pub fn install(&mut self, index: usize, block: usize, tag: u8, data: u32) {
        let b = &mut self.sets[index].blocks[block];
        b.valid = true;
        b.tag = tag;
        b.data = data;
    }

    /// Overwrite the data of a valid block (store hit)
    #[inline(always)]
    pub fn write_data(&mut self, index: usize, block: usize, data: u32) {
        let b = &mut self.sets[index].blocks[block];
        debug_assert!(b.valid, "store hit on invalid block");
        b.data = data;
    }

    /// Borrow one block
    #[inline(always)]
    pub fn block(&self, index: usize, block: usize) -> &CacheBlock {
        &self.sets[index].blocks[block]
    }

    /// Borrow one set
    pub fn set(&self, index: usize) -> &CacheSet {
        &self.sets[index]
    }

    /// All sets in index order
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Check if no block holds valid data
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of valid blocks (0-16)
    pub fn len(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter(|b| b.valid)
            .count()
    }

    /// Valid blocks as a percentage of capacity (0.0-100.0)
    pub fn occupancy(&self) -> f64 {
        (self.len() as f64 / (NUM_SETS * WAYS) as f64) * 100.0
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
