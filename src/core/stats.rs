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

//! Access statistics
//!
//! Counts what the access engine did over a run: hits and misses split by
//! loads and stores, plus how many evictions wrote a block back to memory.

use crate::core::engine::AccessEvent;
use serde::Serialize;
use std::fmt;

/// Per-run access counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Instructions executed to completion
    pub instructions: u64,
    /// Loads that found their word in the cache
    pub load_hits: u64,
    /// Loads that had to fetch from memory
    pub load_misses: u64,
    /// Stores that updated a cached block
    pub store_hits: u64,
    /// Stores written straight to memory
    pub store_misses: u64,
    /// Evictions that copied a valid victim back to memory
    pub writebacks: u64,
}

impl SimStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completed access
    pub fn record(&mut self, event: &AccessEvent) {
        self.instructions += 1;
        match event {
            AccessEvent::LoadHit { .. } => self.load_hits += 1,
            AccessEvent::LoadMiss { writeback, .. } => {
                self.load_misses += 1;
                if writeback.is_some() {
                    self.writebacks += 1;
                }
            }
            AccessEvent::StoreHit { .. } => self.store_hits += 1,
            AccessEvent::StoreMiss => self.store_misses += 1,
        }
    }

    /// Total hits
    pub fn hits(&self) -> u64 {
        self.load_hits + self.store_hits
    }

    /// Total misses
    pub fn misses(&self) -> u64 {
        self.load_misses + self.store_misses
    }

    /// Hits as a percentage of all accesses (0.0 when nothing ran)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64 * 100.0
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instructions | loads {}/{} hit | stores {}/{} hit | {} write-backs | hit rate {:.1}%",
            self.instructions,
            self.load_hits,
            self.load_hits + self.load_misses,
            self.store_hits,
            self.store_hits + self.store_misses,
            self.writebacks,
            self.hit_rate()
        )
    }
}
