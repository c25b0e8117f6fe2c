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

/// Simulator error types
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Main error type for the simulator
///
/// Cache invariant violations are not represented here: they indicate a
/// defect in the cache model itself and abort with a panic.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Malformed trace line {line}: {reason}")]
    MalformedTraceLine { line: usize, reason: String },

    #[error("Invalid opcode 0b{opcode:06b} in instruction 0x{instruction:08X}")]
    InvalidOpcode { opcode: u8, instruction: u32 },

    #[error("Invalid register ${rt} (only $16-$23 / $s0-$s7 are modeled)")]
    InvalidRegister { rt: u8 },

    #[error("Word address {address} out of range (memory holds {size} words)")]
    AddressOutOfRange { address: u16, size: usize },

    #[error("Invalid memory access at word {address}")]
    InvalidMemoryAccess { address: usize },

    #[error("Simulation halted; reset required before executing further instructions")]
    Halted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Whether this error stops the engine from accepting further instructions
    ///
    /// Decode-time rejections (bad opcode, register, or address) halt the
    /// modeled machine. Trace and I/O errors are driver-level concerns.
    pub fn is_fatal_to_engine(&self) -> bool {
        matches!(
            self,
            SimError::InvalidOpcode { .. }
                | SimError::InvalidRegister { .. }
                | SimError::AddressOutOfRange { .. }
        )
    }
}
