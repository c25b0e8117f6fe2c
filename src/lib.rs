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

//! 2-way set-associative data cache simulator
//!
//! Models a small word-addressable main memory behind a 2-way
//! set-associative cache with LRU replacement, driven by a trace of MIPS
//! `lw`/`sw` instructions.
//!
//! # Example
//!
//! ```
//! use cachesim::core::engine::AccessEngine;
//! use cachesim::core::isa::{Instruction, Opcode};
//!
//! let mut engine = AccessEngine::new();
//!
//! // lw $s0, 40($zero)
//! let outcome = engine.execute(Instruction::encode(Opcode::Lw, 16, 40)).unwrap();
//! assert_eq!(outcome.value, 15);
//! ```

pub mod core;
