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

//! Custom assertions for cache simulator testing

use cachesim::core::cache::Recency;
use cachesim::core::engine::AccessEngine;

/// Assert register `$s{slot}` has expected value
#[allow(dead_code)]
pub fn assert_reg(engine: &AccessEngine, slot: usize, expected: u32) {
    let actual = engine.registers().read(slot);
    assert_eq!(
        actual, expected,
        "Register $s{} mismatch: expected {}, got {}",
        slot, expected, actual
    );
}

/// Assert memory contains expected value at word address
#[allow(dead_code)]
pub fn assert_memory_word(engine: &AccessEngine, address: usize, expected: u32) {
    let actual = engine.memory().read(address).expect("Failed to read memory");
    assert_eq!(
        actual, expected,
        "Memory word {} mismatch: expected {}, got {}",
        address, expected, actual
    );
}

/// Assert a block is valid and holds `tag`/`data`
#[allow(dead_code)]
pub fn assert_block(engine: &AccessEngine, index: usize, block: usize, tag: u8, data: u32) {
    let b = engine.cache().block(index, block);
    assert!(b.valid, "Set {} block {} is not valid", index, block);
    assert_eq!(
        (b.tag, b.data),
        (tag, data),
        "Set {} block {} mismatch",
        index,
        block
    );
}

/// Assert which block of a set is MRU
#[allow(dead_code)]
pub fn assert_mru(engine: &AccessEngine, index: usize, block: usize) {
    let set = engine.cache().set(index);
    assert_eq!(set.blocks()[block].recency, Recency::Mru);
    assert_eq!(set.blocks()[block ^ 1].recency, Recency::Lru);
}
