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

//! Instruction word decoding
//!
//! Only the I-type layout is needed for load/store traces:
//!
//! ```text
//! | op (6) | rs (5) | rt (5) | immediate (16) |
//!  31   26  25   21  20   16  15            0
//! ```
//!
//! `rs` is present in the encoding but never read: the base register is
//! treated as `$zero`, so the immediate is the effective address.

use super::Instruction;

/// Extract a `len`-bit window starting at bit `start` (bit 0 = LSB)
///
/// # Arguments
///
/// * `word` - Source word
/// * `start` - Lowest bit of the window
/// * `len` - Window width in bits (1-32)
///
/// # Example
///
/// ```
/// use cachesim::core::isa::extract_bits;
///
/// assert_eq!(extract_bits(0x8C10_0028, 26, 6), 0b100011);
/// assert_eq!(extract_bits(0x8C10_0028, 16, 5), 16);
/// assert_eq!(extract_bits(0x8C10_0028, 0, 16), 0x0028);
/// ```
#[inline(always)]
pub const fn extract_bits(word: u32, start: u32, len: u32) -> u32 {
    debug_assert!(len >= 1 && start + len <= 32);
    if len == 32 {
        word
    } else {
        (word >> start) & ((1 << len) - 1)
    }
}

/// Opcode field position
const OP_SHIFT: u32 = 26;
const OP_BITS: u32 = 6;

/// Target register field position
const RT_SHIFT: u32 = 16;
const RT_BITS: u32 = 5;

/// Immediate field position
const IMM_SHIFT: u32 = 0;
const IMM_BITS: u32 = 16;

/// Decode I-type fields
///
/// Total over every 32-bit input; no field value is rejected here.
///
/// # Returns
///
/// Tuple of (op, rt, imm)
#[inline(always)]
pub fn decode_i_type(word: u32) -> (u8, u8, u16) {
    let op = extract_bits(word, OP_SHIFT, OP_BITS) as u8;
    let rt = extract_bits(word, RT_SHIFT, RT_BITS) as u8;
    let imm = extract_bits(word, IMM_SHIFT, IMM_BITS) as u16;
    (op, rt, imm)
}

/// Decode an instruction word into its fields
///
/// Total over every 32-bit input. Whether the opcode names a load or a
/// store is decided later by [`Instruction::op`].
///
/// # Example
///
/// ```
/// use cachesim::core::isa::{decode, Opcode};
///
/// let lw = decode(0b100011_00000_10000_0000000000101000);
/// assert_eq!(lw.opcode, 0b100011);
/// assert_eq!(lw.op().unwrap(), Opcode::Lw);
/// assert_eq!(lw.rt, 16);
/// assert_eq!(lw.immediate, 40);
///
/// let addi = decode(0x2001_0004);
/// assert!(addi.op().is_err());
/// ```
pub fn decode(word: u32) -> Instruction {
    let (opcode, rt, immediate) = decode_i_type(word);
    Instruction {
        raw: word,
        opcode,
        rt,
        immediate,
    }
}
