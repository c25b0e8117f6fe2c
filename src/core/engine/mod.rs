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

//! Access engine
//!
//! Executes one load/store instruction at a time against the cache, main
//! memory and register file it owns:
//!
//! 1. Decode the instruction word
//! 2. Validate opcode, target register and word address
//! 3. Classify the access as hit or miss
//! 4. Apply the load or store policy
//!
//! # Policies
//!
//! | Access     | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | Load hit   | Block becomes MRU, word copied to the register                |
//! | Load miss  | LRU victim written back if valid, word fetched and installed  |
//! | Store hit  | Register written into the block only (memory is stale)        |
//! | Store miss | Register written straight to memory; cache untouched         |
//!
//! Stores never evict. Modified data reaches memory only when a later load
//! miss evicts the block.
//!
//! # Halting
//!
//! The first instruction that fails validation halts the engine. Nothing is
//! mutated by that instruction, and later calls to [`AccessEngine::execute`]
//! return [`SimError::Halted`] until [`AccessEngine::reset`].

use crate::core::cache::Cache;
use crate::core::error::{Result, SimError};
use crate::core::isa::{decode, Instruction, Opcode};
use crate::core::memory::Memory;
use crate::core::registers::RegisterFile;
use crate::core::stats::SimStats;
use serde::Serialize;

mod load;
mod store;
#[cfg(test)]
mod tests;

/// A victim copied back to memory during eviction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteBack {
    /// Word address rebuilt from the victim's set and tag
    pub address: usize,
    /// Word written
    pub data: u32,
}

/// How an access was served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessEvent {
    /// Load served from `block`
    LoadHit { block: usize },
    /// Load installed into `block`, possibly after writing its old contents back
    LoadMiss {
        block: usize,
        writeback: Option<WriteBack>,
    },
    /// Store updated `block`
    StoreHit { block: usize },
    /// Store went directly to memory
    StoreMiss,
}

impl AccessEvent {
    /// Whether the access hit the cache
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AccessEvent::LoadHit { .. } | AccessEvent::StoreHit { .. }
        )
    }
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Decoded instruction
    pub instruction: Instruction,
    /// Operation performed
    pub op: Opcode,
    /// Set index
    pub index: usize,
    /// Tag
    pub tag: u8,
    /// Word address in memory
    pub address: usize,
    /// Register slot read or written
    pub reg: usize,
    /// Word loaded into or stored from the register
    pub value: u32,
    /// Hit/miss classification
    pub event: AccessEvent,
}

/// Validated coordinates of one access
#[derive(Debug, Clone, Copy)]
pub(crate) struct Access {
    index: usize,
    tag: u8,
    address: usize,
    reg: usize,
}

/// Load/store executor owning all simulated state
///
/// # Example
///
/// ```
/// use cachesim::core::engine::{AccessEngine, AccessEvent};
/// use cachesim::core::isa::{Instruction, Opcode};
///
/// let mut engine = AccessEngine::new();
///
/// // lw $s0, 40($zero) -> word 10, cold miss
/// let outcome = engine.execute(Instruction::encode(Opcode::Lw, 16, 40)).unwrap();
/// assert_eq!(outcome.event, AccessEvent::LoadMiss { block: 0, writeback: None });
/// assert_eq!(engine.registers().read(0), 15);
///
/// // Same word again hits
/// let outcome = engine.execute(Instruction::encode(Opcode::Lw, 17, 40)).unwrap();
/// assert!(outcome.event.is_hit());
/// ```
#[derive(Debug, Clone)]
pub struct AccessEngine {
    cache: Cache,
    memory: Memory,
    registers: RegisterFile,
    stats: SimStats,
    halted: bool,
}

impl AccessEngine {
    /// Create an engine in the power-on state
    ///
    /// - Cache: every set cold
    /// - Memory: `memory[i] = i + 5`
    /// - Registers: zero
    pub fn new() -> Self {
        Self {
            cache: Cache::new(),
            memory: Memory::new(),
            registers: RegisterFile::new(),
            stats: SimStats::new(),
            halted: false,
        }
    }

    /// Return to the power-on state and clear any halt
    pub fn reset(&mut self) {
        self.cache.reset();
        self.memory.reset();
        self.registers.reset();
        self.stats = SimStats::new();
        self.halted = false;
    }

    /// Execute one instruction word
    ///
    /// # Errors
    ///
    /// - `Halted` if an earlier instruction halted the engine
    /// - `InvalidOpcode` for anything other than `lw`/`sw`
    /// - `InvalidRegister` for a target outside `$s0-$s7`
    /// - `AddressOutOfRange` for a word address beyond memory
    ///
    /// Each of the last three halts the engine without mutating state.
    pub fn execute(&mut self, word: u32) -> Result<AccessOutcome> {
        if self.halted {
            return Err(SimError::Halted);
        }

        let instruction = decode(word);
        let (op, access) = match self.validate(&instruction) {
            Ok(v) => v,
            Err(e) => {
                if e.is_fatal_to_engine() {
                    self.halted = true;
                    log::warn!("Halting at 0x{:08X}: {}", word, e);
                }
                return Err(e);
            }
        };

        let (value, event) = match op {
            Opcode::Lw => self.op_lw(&access)?,
            Opcode::Sw => self.op_sw(&access)?,
        };
        self.stats.record(&event);

        log::debug!(
            "{} -> set {} tag {:04b} word {}: {:?}",
            instruction,
            access.index,
            access.tag,
            access.address,
            event
        );

        Ok(AccessOutcome {
            instruction,
            op,
            index: access.index,
            tag: access.tag,
            address: access.address,
            reg: access.reg,
            value,
            event,
        })
    }

    /// Check every field before anything is touched
    fn validate(&self, instruction: &Instruction) -> Result<(Opcode, Access)> {
        let op = instruction.op()?;
        let reg = RegisterFile::slot(instruction.rt)?;
        let address = instruction.address();
        if !self.memory.contains(address as usize) {
            return Err(SimError::AddressOutOfRange {
                address,
                size: self.memory.len(),
            });
        }

        Ok((
            op,
            Access {
                index: instruction.index(),
                tag: instruction.tag(),
                address: address as usize,
                reg,
            },
        ))
    }

    /// Whether a fatal instruction stopped the engine
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Cache state
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Main memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable main memory (for seeding test scenarios)
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Register file
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Mutable register file (for seeding store values)
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    /// Counters for this run
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}

impl Default for AccessEngine {
    fn default() -> Self {
        Self::new()
    }
}
