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

//! Address derivation from the 16-bit immediate
//!
//! # Bit windows
//!
//! ```text
//! immediate (16 bits):
//! | unused (7) | tag (4) | index (3) | byte (2) |
//!  15       9   8     5   4       2   1      0
//!
//! word address = immediate[15:2]
//!              = unused:tag:index
//! ```
//!
//! The tag and index windows are contiguous and disjoint, so a word address
//! inside memory is fully determined by `(index, tag)`. Write-back relies on
//! this to recover a victim's address from what the cache line stores.

use crate::core::cache::NUM_SETS;
use crate::core::memory::MEM_SIZE;

use super::decode::extract_bits;

/// Byte offset bits discarded to form a word address
pub const OFFSET_BITS: u32 = 2;

/// Set index width (8 sets)
pub const INDEX_BITS: u32 = 3;

/// Tag width
pub const TAG_BITS: u32 = 4;

const INDEX_SHIFT: u32 = OFFSET_BITS;
const TAG_SHIFT: u32 = OFFSET_BITS + INDEX_BITS;
const ADDRESS_BITS: u32 = 16 - OFFSET_BITS;

const _: () = assert!(1 << INDEX_BITS == NUM_SETS);
const _: () = assert!(1 << (INDEX_BITS + TAG_BITS) == MEM_SIZE);

/// Set index selected by an immediate (bits [4:2])
///
/// # Example
///
/// ```
/// use cachesim::core::isa::derive_index;
///
/// assert_eq!(derive_index(40), 2); // word 10 -> set 2
/// ```
#[inline(always)]
pub fn derive_index(immediate: u16) -> usize {
    extract_bits(immediate as u32, INDEX_SHIFT, INDEX_BITS) as usize
}

/// Tag stored alongside cached data (bits [8:5])
#[inline(always)]
pub fn derive_tag(immediate: u16) -> u8 {
    extract_bits(immediate as u32, TAG_SHIFT, TAG_BITS) as u8
}

/// Word address used to index main memory (bits [15:2])
///
/// Values at or above [`MEM_SIZE`] are representable here and rejected by
/// the access engine before anything is touched.
#[inline(always)]
pub fn derive_address(immediate: u16) -> u16 {
    extract_bits(immediate as u32, OFFSET_BITS, ADDRESS_BITS) as u16
}

/// Rebuild a word address from the set it lives in and its tag
///
/// Inverse of [`derive_index`]/[`derive_tag`] for every in-range address.
///
/// # Example
///
/// ```
/// use cachesim::core::isa::{derive_address, derive_index, derive_tag, reconstruct_address};
///
/// let imm = 0b0_0001_010_00; // word 10
/// assert_eq!(
///     reconstruct_address(derive_index(imm), derive_tag(imm)),
///     derive_address(imm) as usize,
/// );
/// ```
#[inline(always)]
pub fn reconstruct_address(index: usize, tag: u8) -> usize {
    ((tag as usize) << INDEX_BITS) | index
}

/// Build the immediate that addresses a given memory word
///
/// Handy for writing traces by hand; the byte offset is left at zero.
#[inline(always)]
pub fn immediate_for_word(word_address: u16) -> u16 {
    word_address << OFFSET_BITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_windows_for_word_ten() {
        // 0b0000000_0001_010_00
        let imm = 40;
        assert_eq!(derive_index(imm), 2);
        assert_eq!(derive_tag(imm), 1);
        assert_eq!(derive_address(imm), 10);
    }

    #[test]
    fn test_byte_offset_discarded() {
        for offset in 0..4 {
            assert_eq!(derive_address(40 + offset), 10);
            assert_eq!(derive_index(40 + offset), 2);
            assert_eq!(derive_tag(40 + offset), 1);
        }
    }

    #[test]
    fn test_high_bits_only_affect_address() {
        let imm = 0b1000_0000_0010_1000;
        assert_eq!(derive_index(imm), 2);
        assert_eq!(derive_tag(imm), 1);
        assert_eq!(derive_address(imm), (1 << 13) | 10);
    }

    #[test]
    fn test_extreme_windows() {
        assert_eq!(derive_index(0xFFFF), 7);
        assert_eq!(derive_tag(0xFFFF), 0xF);
        assert_eq!(derive_address(0xFFFF), 0x3FFF);
        assert_eq!(derive_address(0), 0);
    }

    #[test]
    fn test_immediate_for_word() {
        assert_eq!(immediate_for_word(10), 40);
        assert_eq!(derive_address(immediate_for_word(127)), 127);
    }

    proptest! {
        #[test]
        fn prop_index_matches_address_modulo_sets(imm in any::<u16>()) {
            prop_assert_eq!(derive_address(imm) as usize % NUM_SETS, derive_index(imm));
        }

        #[test]
        fn prop_in_range_address_reconstructs(word in 0u16..MEM_SIZE as u16, offset in 0u16..4) {
            let imm = immediate_for_word(word) | offset;
            prop_assert_eq!(
                reconstruct_address(derive_index(imm), derive_tag(imm)),
                word as usize
            );
        }
    }
}
