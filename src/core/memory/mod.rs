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

//! Main memory backing the data cache
//!
//! A flat array of [`MEM_SIZE`] 32-bit words addressed by word index.
//! Every run starts from the same deterministic image: `memory[i] = i + 5`.
//!
//! # Example
//!
//! ```
//! use cachesim::core::memory::Memory;
//!
//! let mut memory = Memory::new();
//! assert_eq!(memory.read(10).unwrap(), 15);
//!
//! memory.write(10, 99).unwrap();
//! assert_eq!(memory.read(10).unwrap(), 99);
//!
//! assert!(memory.read(128).is_err());
//! ```

use crate::core::error::{Result, SimError};

/// Memory size in words
pub const MEM_SIZE: usize = 128;

/// Offset applied to every word of the power-on image
const INIT_BIAS: u32 = 5;

/// Word-addressable main memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    words: Vec<u32>,
}

impl Memory {
    /// Create memory holding the power-on image
    pub fn new() -> Self {
        let mut memory = Self {
            words: vec![0; MEM_SIZE],
        };
        memory.reset();
        memory
    }

    /// Restore the power-on image (`memory[i] = i + 5`)
    pub fn reset(&mut self) {
        for (i, word) in self.words.iter_mut().enumerate() {
            *word = i as u32 + INIT_BIAS;
        }
    }

    /// Read a word
    ///
    /// # Errors
    ///
    /// `InvalidMemoryAccess` when `address >= MEM_SIZE`.
    #[inline(always)]
    pub fn read(&self, address: usize) -> Result<u32> {
        self.words
            .get(address)
            .copied()
            .ok_or(SimError::InvalidMemoryAccess { address })
    }

    /// Write a word
    ///
    /// # Errors
    ///
    /// `InvalidMemoryAccess` when `address >= MEM_SIZE`.
    #[inline(always)]
    pub fn write(&mut self, address: usize, value: u32) -> Result<()> {
        let word = self
            .words
            .get_mut(address)
            .ok_or(SimError::InvalidMemoryAccess { address })?;
        *word = value;
        Ok(())
    }

    /// Whether a word address is backed by memory
    #[inline(always)]
    pub fn contains(&self, address: usize) -> bool {
        address < self.words.len()
    }

    /// All words, in address order
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; memory has a fixed non-zero size
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
