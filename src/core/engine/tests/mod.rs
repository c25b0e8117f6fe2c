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

//! Access engine test modules
//!
//! - `load`: load hit/miss, victim selection, write-back
//! - `store`: store hit and no-write-allocate miss
//! - `halt`: rejection of bad instructions
//! - `scenario`: multi-instruction traces through one set

use super::*;
use crate::core::isa::{immediate_for_word, Instruction, Opcode};


/// `lw $s{slot}, word*4($zero)`
fn lw(slot: u8, word: u16) -> u32 {
    Instruction::encode(Opcode::Lw, 16 + slot, immediate_for_word(word))
}

/// `sw $s{slot}, word*4($zero)`
fn sw(slot: u8, word: u16) -> u32 {
    Instruction::encode(Opcode::Sw, 16 + slot, immediate_for_word(word))
}
