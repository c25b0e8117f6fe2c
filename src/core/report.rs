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

//! State dumps for cache, registers and memory
//!
//! Reporting never touches simulation state; it only reads an
//! [`AccessEngine`]. Two renderings exist:
//!
//! - **Text**: one row per block / register / memory word
//! - **JSON**: a serialized [`Snapshot`]

use crate::core::cache::CacheSet;
use crate::core::engine::AccessEngine;
use crate::core::error::Result;
use crate::core::isa::TAG_BITS;
use crate::core::registers::RegisterFile;
use crate::core::stats::SimStats;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON snapshot
    Json,
}

/// Which sections a report contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sections {
    /// Cache contents
    pub cache: bool,
    /// Register file
    pub registers: bool,
    /// Main memory
    pub memory: bool,
    /// Access counters
    pub stats: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            cache: true,
            registers: false,
            memory: false,
            stats: false,
        }
    }
}

impl Sections {
    /// Every section enabled
    pub fn all() -> Self {
        Self {
            cache: true,
            registers: true,
            memory: true,
            stats: true,
        }
    }
}

/// Serializable copy of the simulated state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<Vec<CacheSet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registers: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SimStats>,
    pub halted: bool,
}

impl Snapshot {
    /// Capture the selected sections of an engine
    pub fn capture(engine: &AccessEngine, sections: Sections) -> Self {
        Self {
            cache: sections.cache.then(|| engine.cache().sets().to_vec()),
            registers: sections
                .registers
                .then(|| engine.registers().as_slice().to_vec()),
            memory: sections.memory.then(|| engine.memory().words().to_vec()),
            stats: sections.stats.then(|| *engine.stats()),
            halted: engine.is_halted(),
        }
    }
}

/// Formats engine state for display
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: ReportFormat,
    sections: Sections,
}

impl Reporter {
    /// Create a reporter
    pub fn new(format: ReportFormat, sections: Sections) -> Self {
        Self { format, sections }
    }

    /// Render the selected sections
    ///
    /// # Errors
    ///
    /// `Json` if serialization fails.
    pub fn render(&self, engine: &AccessEngine) -> Result<String> {
        match self.format {
            ReportFormat::Json => {
                let snapshot = Snapshot::capture(engine, self.sections);
                Ok(serde_json::to_string_pretty(&snapshot)?)
            }
            ReportFormat::Text => {
                let mut out = String::new();
                if self.sections.cache {
                    out.push_str(&format_cache(engine));
                }
                if self.sections.registers {
                    out.push_str(&format_registers(engine));
                }
                if self.sections.memory {
                    out.push_str(&format_memory(engine));
                }
                if self.sections.stats {
                    out.push_str(&format_stats(engine.stats()));
                }
                Ok(out)
            }
        }
    }
}

/// Cache table, one row per block
///
/// ```text
/// Set 2, Block 0: V:1 H:MRU Tag:0001 Data:15
/// Set 2, Block 1: V:0 H:LRU
/// ```
pub fn format_cache(engine: &AccessEngine) -> String {
    let mut out = String::from("Cache Contents:\n");
    for (i, set) in engine.cache().sets().iter().enumerate() {
        for (j, block) in set.blocks().iter().enumerate() {
            // Writing into a String cannot fail
            let _ = write!(out, "Set {}, Block {}: V:{} H:{}", i, j, block.valid as u8, block.recency);
            if block.valid {
                let _ = write!(
                    out,
                    " Tag:{:0width$b} Data:{}",
                    block.tag,
                    block.data,
                    width = TAG_BITS as usize
                );
            }
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// Register table (`$s0-$s7`)
pub fn format_registers(engine: &AccessEngine) -> String {
    let mut out = String::from("Registers:\n");
    for (slot, value) in engine.registers().as_slice().iter().enumerate() {
        let _ = writeln!(out, "{}: {}", RegisterFile::name(slot), value);
    }
    out.push('\n');
    out
}

/// Memory table, one row per word
pub fn format_memory(engine: &AccessEngine) -> String {
    let mut out = String::from("Memory Contents:\n");
    for (address, value) in engine.memory().words().iter().enumerate() {
        let _ = writeln!(out, "Block {}: {}", address, value);
    }
    out.push('\n');
    out
}

/// One-line counter summary
pub fn format_stats(stats: &SimStats) -> String {
    format!("Statistics:\n{}\n\n", stats)
}
