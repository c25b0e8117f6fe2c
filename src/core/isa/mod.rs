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

//! Load/store instruction set
//!
//! Decodes the two MIPS memory instructions the cache model understands and
//! derives cache coordinates from their immediates.
//!
//! | Mnemonic | Opcode   | Operation                    |
//! |----------|----------|------------------------------|
//! | `lw`     | `100011` | `rt = memory[immediate >> 2]`|
//! | `sw`     | `101011` | `memory[immediate >> 2] = rt`|

mod address;
mod decode;

pub use address::{
    derive_address, derive_index, derive_tag, immediate_for_word, reconstruct_address,
    INDEX_BITS, OFFSET_BITS, TAG_BITS,
};
pub use decode::{decode, decode_i_type, extract_bits};

use crate::core::error::{Result, SimError};
use serde::Serialize;
use std::fmt;

/// Memory operation named by an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Opcode {
    /// Load word
    Lw,
    /// Store word
    Sw,
}

impl Opcode {
    /// `lw` opcode pattern
    pub const LW_BITS: u8 = 0b100011;
    /// `sw` opcode pattern
    pub const SW_BITS: u8 = 0b101011;

    /// Canonical 6-bit encoding
    pub const fn bits(self) -> u8 {
        match self {
            Opcode::Lw => Self::LW_BITS,
            Opcode::Sw => Self::SW_BITS,
        }
    }

    /// Assembly mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Lw => "lw",
            Opcode::Sw => "sw",
        }
    }
}

impl TryFrom<u8> for Opcode {
    /// The rejected opcode bits
    type Error = u8;

    fn try_from(bits: u8) -> std::result::Result<Self, u8> {
        match bits {
            Self::LW_BITS => Ok(Opcode::Lw),
            Self::SW_BITS => Ok(Opcode::Sw),
            other => Err(other),
        }
    }
}

/// A decoded instruction word
///
/// Fields are raw bit values; nothing is validated until the engine
/// dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Original 32-bit encoding
    pub raw: u32,
    /// Opcode field (bits [31:26])
    pub opcode: u8,
    /// Target register field (bits [20:16])
    pub rt: u8,
    /// Immediate field (bits [15:0])
    pub immediate: u16,
}

impl Instruction {
    /// Encode an instruction from its parts
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::core::isa::{decode, Instruction, Opcode};
    ///
    /// let word = Instruction::encode(Opcode::Sw, 17, 40);
    /// assert_eq!(word, 0xAC11_0028);
    /// assert_eq!(decode(word).rt, 17);
    /// ```
    pub const fn encode(op: Opcode, rt: u8, immediate: u16) -> u32 {
        ((op.bits() as u32) << 26) | (((rt & 0x1F) as u32) << 16) | immediate as u32
    }

    /// Operation this instruction requests
    ///
    /// # Errors
    ///
    /// `InvalidOpcode` for any opcode other than `lw`/`sw`.
    pub fn op(&self) -> Result<Opcode> {
        Opcode::try_from(self.opcode).map_err(|opcode| SimError::InvalidOpcode {
            opcode,
            instruction: self.raw,
        })
    }

    /// Set index derived from the immediate
    #[inline(always)]
    pub fn index(&self) -> usize {
        derive_index(self.immediate)
    }

    /// Tag derived from the immediate
    #[inline(always)]
    pub fn tag(&self) -> u8 {
        derive_tag(self.immediate)
    }

    /// Word address derived from the immediate
    #[inline(always)]
    pub fn address(&self) -> u16 {
        derive_address(self.immediate)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Opcode::try_from(self.opcode) {
            Ok(op) => write!(f, "{} ${}, {}($zero)", op.mnemonic(), self.rt, self.immediate),
            Err(bits) => write!(f, "??? op=0b{:06b} (0x{:08X})", bits, self.raw),
        }
    }
}
