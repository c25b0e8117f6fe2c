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

//! Test fixtures for common test scenarios

use cachesim::core::engine::AccessEngine;
use cachesim::core::isa::{immediate_for_word, Instruction, Opcode};
use cachesim::core::trace::format_line;
use std::io::Write;
use tempfile::NamedTempFile;

/// `lw $s{slot}, word*4($zero)`
#[allow(dead_code)]
pub fn lw(slot: u8, word: u16) -> u32 {
    Instruction::encode(Opcode::Lw, 16 + slot, immediate_for_word(word))
}

/// `sw $s{slot}, word*4($zero)`
#[allow(dead_code)]
pub fn sw(slot: u8, word: u16) -> u32 {
    Instruction::encode(Opcode::Sw, 16 + slot, immediate_for_word(word))
}

/// Execute every word, panicking on the first error
#[allow(dead_code)]
pub fn execute_all(engine: &mut AccessEngine, words: &[u32]) {
    for &word in words {
        engine
            .execute(word)
            .unwrap_or_else(|e| panic!("0x{:08X} failed: {}", word, e));
    }
}

/// Render words as trace text, one line each
#[allow(dead_code)]
pub fn trace_text(words: &[u32]) -> String {
    words.iter().map(|&w| format_line(w) + "\n").collect()
}

/// Write trace text to a temporary file
#[allow(dead_code)]
pub fn trace_file(text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("trace_")
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create trace file");
    file.write_all(text.as_bytes())
        .expect("Failed to write trace file");
    file
}
