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

//! Register file for load/store traces
//!
//! Only the saved registers `$s0-$s7` exist. Instructions name them by their
//! MIPS numbers (`$16-$23`), which map to slots `0-7`.

use crate::core::error::{Result, SimError};

/// Number of modeled registers
pub const NUM_REGISTERS: usize = 8;

/// MIPS number of `$s0`
pub const FIRST_SAVED_REG: u8 = 16;

/// Saved-register file (`$s0-$s7`)
///
/// # Example
///
/// ```
/// use cachesim::core::registers::RegisterFile;
///
/// let mut regs = RegisterFile::new();
/// let s1 = RegisterFile::slot(17).unwrap();
/// regs.write(s1, 42);
/// assert_eq!(regs.read(s1), 42);
/// assert!(RegisterFile::slot(8).is_err()); // $t0 is not modeled
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Create a zeroed register file
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every register to zero
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGISTERS];
    }

    /// Map an `rt` field to a register slot
    ///
    /// # Errors
    ///
    /// `InvalidRegister` when `rt` is outside `$16-$23`.
    pub fn slot(rt: u8) -> Result<usize> {
        rt.checked_sub(FIRST_SAVED_REG)
            .map(usize::from)
            .filter(|&slot| slot < NUM_REGISTERS)
            .ok_or(SimError::InvalidRegister { rt })
    }

    /// Read a register by slot
    ///
    /// # Panics
    ///
    /// If `slot >= NUM_REGISTERS`; use [`RegisterFile::slot`] to validate.
    #[inline(always)]
    pub fn read(&self, slot: usize) -> u32 {
        self.regs[slot]
    }

    /// Write a register by slot
    #[inline(always)]
    pub fn write(&mut self, slot: usize, value: u32) {
        self.regs[slot] = value;
    }

    /// All registers, `$s0` first
    pub fn as_slice(&self) -> &[u32] {
        &self.regs
    }

    /// Assembly name of a slot
    pub fn name(slot: usize) -> String {
        format!("$s{}", slot)
    }
}
