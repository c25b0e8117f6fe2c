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

//! Core simulation components
//!
//! Leaf-first:
//! - `isa`: instruction decoding and address derivation
//! - `memory`: flat word-addressed main memory
//! - `registers`: `$s0-$s7` register file
//! - `cache`: 2-way set-associative cache state and LRU ordering
//! - `engine`: load/store execution, hit/miss handling, write-back
//! - `trace`: text trace parsing
//! - `report`: state dumps
//! - `simulator`: trace replay loop

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod isa;
pub mod memory;
pub mod registers;
pub mod report;
pub mod simulator;
pub mod stats;
pub mod trace;

// Re-export commonly used types
pub use cache::Cache;
pub use config::SimConfig;
pub use engine::{AccessEngine, AccessEvent, AccessOutcome};
pub use error::{Result, SimError};
pub use memory::Memory;
pub use registers::RegisterFile;
pub use simulator::Simulator;
