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

//! Simulator configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. A TOML file (optional)
//! 2. Environment variables (`.env` is loaded by the binary)
//! 3. Command line flags (applied by the binary)
//!
//! # File format
//!
//! ```toml
//! trace = "input_file.txt"
//! max_instructions = 1000
//! on_malformed = "skip"
//!
//! [report]
//! format = "json"
//! every_step = false
//!
//! [report.sections]
//! cache = true
//! registers = true
//! memory = false
//! stats = true
//! ```
//!
//! # Environment
//!
//! | Variable                    | Field              |
//! |-----------------------------|--------------------|
//! | `CACHESIM_TRACE`            | `trace`            |
//! | `CACHESIM_MAX_INSTRUCTIONS` | `max_instructions` |

use crate::core::error::{Result, SimError};
use crate::core::report::{ReportFormat, Sections};
use crate::core::trace::MalformedLinePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Trace read when nothing else is configured
pub const DEFAULT_TRACE: &str = "input_file.txt";

/// Environment variable overriding the trace path
pub const ENV_TRACE: &str = "CACHESIM_TRACE";

/// Environment variable overriding the instruction limit
pub const ENV_MAX_INSTRUCTIONS: &str = "CACHESIM_MAX_INSTRUCTIONS";

/// Report settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output rendering
    pub format: ReportFormat,
    /// Dump state after every instruction, not just at the end
    pub every_step: bool,
    /// Sections to include
    pub sections: Sections,
}

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Trace file to replay
    pub trace: PathBuf,
    /// Stop after this many instructions
    pub max_instructions: Option<usize>,
    /// Handling of malformed trace lines
    pub on_malformed: MalformedLinePolicy,
    /// Report settings
    pub report: ReportConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trace: PathBuf::from(DEFAULT_TRACE),
            max_instructions: None,
            on_malformed: MalformedLinePolicy::default(),
            report: ReportConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a TOML document
    ///
    /// # Example
    ///
    /// ```
    /// use cachesim::core::config::SimConfig;
    /// use cachesim::core::trace::MalformedLinePolicy;
    ///
    /// let config = SimConfig::from_toml_str("on_malformed = \"skip\"").unwrap();
    /// assert_eq!(config.on_malformed, MalformedLinePolicy::Skip);
    /// assert_eq!(config.trace.to_str(), Some("input_file.txt"));
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SimError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// # Errors
    ///
    /// `Config` if `CACHESIM_MAX_INSTRUCTIONS` is not a number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trace) = lookup(ENV_TRACE) {
            self.trace = PathBuf::from(trace);
        }
        if let Some(max) = lookup(ENV_MAX_INSTRUCTIONS) {
            let max = max.trim().parse().map_err(|_| {
                SimError::Config(format!("{} must be a number, got {:?}", ENV_MAX_INSTRUCTIONS, max))
            })?;
            self.max_instructions = Some(max);
        }
        Ok(())
    }
}
