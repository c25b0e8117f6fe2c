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

mod common;

use cachesim::core::engine::{AccessEngine, AccessEvent, WriteBack};
use cachesim::core::error::{Result, SimError};
use cachesim::core::isa::{derive_address, derive_index, immediate_for_word};
use common::assertions::*;
use common::fixtures::*;

#[test]
fn test_basic_initialization() -> Result<()> {
    let engine = AccessEngine::new();
    assert!(engine.cache().is_empty());
    assert_memory_word(&engine, 0, 5);
    assert_memory_word(&engine, 127, 132);
    for slot in 0..8 {
        assert_reg(&engine, slot, 0);
    }
    Ok(())
}

#[test]
fn test_cold_start_determinism() {
    for index in 0..8u16 {
        let mut engine = AccessEngine::new();
        let first = engine.execute(lw(0, index)).unwrap();
        let second = engine.execute(lw(1, index + 8)).unwrap();

        assert_eq!(
            first.event,
            AccessEvent::LoadMiss {
                block: 0,
                writeback: None
            }
        );
        assert_eq!(
            second.event,
            AccessEvent::LoadMiss {
                block: 1,
                writeback: None
            }
        );
        assert_block(&engine, index as usize, 0, 0, index as u32 + 5);
        assert_block(&engine, index as usize, 1, 1, index as u32 + 13);
    }
}

#[test]
fn test_hit_correctness() {
    let mut engine = AccessEngine::new();
    execute_all(&mut engine, &[lw(0, 45), lw(1, 45)]);

    // word 45 -> set 5, tag 5
    assert_eq!(derive_index(immediate_for_word(45)), 5);
    assert_block(&engine, 5, 0, 5, 50);
    assert_reg(&engine, 1, 50);
    assert_eq!(engine.stats().load_hits, 1);
}

#[test]
fn test_write_back_on_eviction() {
    let mut engine = AccessEngine::new();
    engine.registers_mut().write(6, 1234);
    execute_all(&mut engine, &[lw(0, 12), lw(1, 20), sw(6, 12), lw(2, 20)]);
    // set 4: block 0 = word 12 (dirty, LRU), block 1 = word 20 (MRU)
    assert_mru(&engine, 4, 1);

    let outcome = engine.execute(lw(3, 28)).unwrap();
    assert_eq!(
        outcome.event,
        AccessEvent::LoadMiss {
            block: 0,
            writeback: Some(WriteBack {
                address: 12,
                data: 1234
            })
        }
    );
    assert_memory_word(&engine, 12, 1234);
    assert_block(&engine, 4, 0, 3, 33);
    assert_mru(&engine, 4, 0);
}

#[test]
fn test_no_write_allocate_on_store_miss() {
    let mut engine = AccessEngine::new();
    execute_all(&mut engine, &[lw(0, 9), lw(1, 17)]);
    let before = *engine.cache().set(1);

    engine.registers_mut().write(2, 4242);
    let outcome = engine.execute(sw(2, 25)).unwrap();

    assert_eq!(outcome.event, AccessEvent::StoreMiss);
    assert_eq!(*engine.cache().set(1), before);
    assert_memory_word(&engine, derive_address(immediate_for_word(25)) as usize, 4242);
}

#[test]
fn test_opcode_rejection_stops_everything() {
    let mut engine = AccessEngine::new();
    execute_all(&mut engine, &[lw(0, 10)]);
    let cache = engine.cache().clone();

    // j 0x0000028 (opcode 000010)
    assert!(matches!(
        engine.execute(0x0800_000A),
        Err(SimError::InvalidOpcode { opcode: 0b000010, .. })
    ));
    assert!(matches!(engine.execute(lw(1, 18)), Err(SimError::Halted)));
    assert_eq!(engine.cache(), &cache);
    assert_reg(&engine, 1, 0);
}

#[test]
fn test_independent_engines() {
    let mut a = AccessEngine::new();
    let b = AccessEngine::new();
    execute_all(&mut a, &[lw(0, 10)]);
    assert!(b.cache().is_empty());
    assert_reg(&b, 0, 0);
}
