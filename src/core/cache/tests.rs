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

use super::*;

/// Install `tag`/`data` into a set the way a load miss does
fn fill(cache: &mut Cache, index: usize, tag: u8, data: u32) -> usize {
    let victim = cache.select_victim(index);
    cache.install(index, victim, tag, data);
    cache.update_recency(index, victim);
    victim
}

#[test]
fn test_cache_new() {
    let cache = Cache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.sets().len(), NUM_SETS);
    assert!(cache.sets().iter().all(CacheSet::is_cold));
}

#[test]
fn test_cache_miss() {
    let cache = Cache::new();
    for index in 0..NUM_SETS {
        assert_eq!(cache.lookup(index, 0), None);
    }
}

#[test]
fn test_lookup_ignores_invalid_blocks() {
    let mut cache = Cache::new();
    // Cold blocks carry tag 0; they must not match
    assert_eq!(cache.lookup(0, 0), None);

    cache.install(0, 1, 0, 7);
    assert_eq!(cache.lookup(0, 0), Some(1));
}

#[test]
fn test_lookup_scans_block_zero_first() {
    let mut cache = Cache::new();
    cache.install(4, 0, 3, 10);
    cache.install(4, 1, 3, 20);
    assert_eq!(cache.lookup(4, 3), Some(0));
}

#[test]
fn test_cold_start_selects_block_zero() {
    let mut cache = Cache::new();
    assert_eq!(cache.select_victim(5), 0);
    // Ordering established at first touch
    assert_eq!(cache.block(5, 1).recency, Recency::Lru);
    assert!(!cache.set(5).is_cold());
}

#[test]
fn test_second_distinct_tag_fills_block_one() {
    let mut cache = Cache::new();
    assert_eq!(fill(&mut cache, 2, 1, 15), 0);
    assert_eq!(fill(&mut cache, 2, 2, 23), 1);

    assert_eq!(cache.lookup(2, 1), Some(0));
    assert_eq!(cache.lookup(2, 2), Some(1));
    assert_eq!(cache.block(2, 0).recency, Recency::Lru);
    assert_eq!(cache.block(2, 1).recency, Recency::Mru);
}

#[test]
fn test_lru_victim_after_hit() {
    let mut cache = Cache::new();
    fill(&mut cache, 3, 1, 100);
    fill(&mut cache, 3, 2, 200);

    // Touch block 0 again; block 1 becomes the victim
    cache.update_recency(3, 0);
    assert_eq!(cache.select_victim(3), 1);

    cache.update_recency(3, 1);
    assert_eq!(cache.select_victim(3), 0);
}

#[test]
fn test_select_victim_has_no_side_effect_when_ordered() {
    let mut cache = Cache::new();
    fill(&mut cache, 6, 1, 1);
    let before = *cache.set(6);
    assert_eq!(cache.select_victim(6), 1);
    assert_eq!(*cache.set(6), before);
}

#[test]
fn test_install_does_not_touch_recency() {
    let mut cache = Cache::new();
    fill(&mut cache, 1, 1, 1);
    let recency = cache.block(1, 1).recency;
    cache.install(1, 1, 9, 99);
    assert_eq!(cache.block(1, 1).recency, recency);
    assert_eq!(
        *cache.block(1, 1),
        CacheBlock {
            valid: true,
            recency,
            tag: 9,
            data: 99
        }
    );
}

#[test]
fn test_write_data() {
    let mut cache = Cache::new();
    fill(&mut cache, 0, 4, 1);
    cache.write_data(0, 0, 0xABCD);
    assert_eq!(cache.block(0, 0).data, 0xABCD);
    assert_eq!(cache.block(0, 0).tag, 4);
}

#[test]
fn test_sets_are_independent() {
    let mut cache = Cache::new();
    fill(&mut cache, 0, 1, 1);
    assert!(cache.set(1).is_cold());
    assert_eq!(cache.select_victim(1), 0);
}

#[test]
fn test_occupancy_and_reset() {
    let mut cache = Cache::new();
    for index in 0..NUM_SETS {
        fill(&mut cache, index, 1, 0);
    }
    assert_eq!(cache.len(), NUM_SETS);
    assert_eq!(cache.occupancy(), 50.0);

    cache.reset();
    assert!(cache.is_empty());
    assert_eq!(cache, Cache::new());
}

#[test]
#[should_panic(expected = "cache invariant violated")]
fn test_both_lru_is_fatal() {
    let mut cache = Cache::new();
    cache.sets[7].blocks[0].recency = Recency::Lru;
    cache.sets[7].blocks[1].recency = Recency::Lru;
    cache.select_victim(7);
}

#[test]
#[should_panic(expected = "cache invariant violated")]
fn test_half_cold_set_is_fatal() {
    let mut cache = Cache::new();
    cache.sets[0].blocks[0].recency = Recency::Mru;
    cache.select_victim(0);
}

#[test]
fn test_recency_display() {
    assert_eq!(Recency::Cold.to_string(), "-");
    assert_eq!(Recency::Mru.to_string(), "MRU");
    assert_eq!(Recency::Lru.to_string(), "LRU");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_every_touched_set_stays_ordered(
            accesses in prop::collection::vec((0usize..NUM_SETS, 0u8..16), 1..64)
        ) {
            let mut cache = Cache::new();
            for (index, tag) in accesses {
                match cache.lookup(index, tag) {
                    Some(block) => cache.update_recency(index, block),
                    None => {
                        fill(&mut cache, index, tag, 0);
                    }
                }
                prop_assert!(cache.set(index).is_ordered());
                prop_assert!(cache.lookup(index, tag).is_some());
            }
            for set in cache.sets() {
                prop_assert!(set.is_cold() || set.is_ordered());
            }
        }
    }
}
