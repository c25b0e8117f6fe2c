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

//! Trace-driven simulation loop
//!
//! Feeds a trace through an [`AccessEngine`] one instruction at a time.
//! Every instruction finishes, write-back included, before the next line is
//! read. A run ends at end of trace, at the configured instruction limit, or
//! at the first fatal error.
//!
//! # Example
//!
//! ```
//! use cachesim::core::config::SimConfig;
//! use cachesim::core::simulator::Simulator;
//!
//! let trace = "10001100000100000000000000101000\n";
//! let mut sim = Simulator::new(SimConfig::default());
//! let summary = sim.run(trace.as_bytes(), &mut std::io::sink()).unwrap();
//!
//! assert_eq!(summary.executed, 1);
//! assert_eq!(sim.engine().registers().read(0), 15);
//! ```

use crate::core::config::SimConfig;
use crate::core::engine::{AccessEngine, AccessOutcome};
use crate::core::error::{Result, SimError};
use crate::core::report::Reporter;
use crate::core::trace::{MalformedLinePolicy, TraceReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Progress of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed
    pub executed: usize,
    /// Malformed lines skipped
    pub skipped: usize,
    /// Run stopped at the instruction limit with trace left over
    pub truncated: bool,
}

/// Drives an engine from a trace
#[derive(Debug)]
pub struct Simulator {
    engine: AccessEngine,
    config: SimConfig,
    summary: RunSummary,
}

impl Simulator {
    /// Create a simulator with a fresh engine
    pub fn new(config: SimConfig) -> Self {
        Self {
            engine: AccessEngine::new(),
            config,
            summary: RunSummary::default(),
        }
    }

    /// Replay the configured trace file
    pub fn run_file<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let path = self.config.trace.clone();
        self.run_path(&path, out)
    }

    /// Replay a trace file
    pub fn run_path<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<RunSummary> {
        let file = File::open(path).map_err(|e| {
            log::error!("Unable to open trace {}: {}", path.display(), e);
            SimError::Io(e)
        })?;
        log::info!("Replaying trace {}", path.display());
        self.run(BufReader::new(file), out)
    }

    /// Replay a trace from any buffered reader
    ///
    /// Each call is a fresh run: the summary and the instruction limit
    /// start from zero, while engine state carries over until
    /// [`Simulator::reset`]. Per-step dumps, when enabled, are written to
    /// `out`.
    ///
    /// # Errors
    ///
    /// The first fatal error: an engine rejection, an I/O failure, or a
    /// malformed line under [`MalformedLinePolicy::Abort`]. Progress made
    /// before the error stays visible through [`Simulator::summary`] and
    /// [`Simulator::engine`].
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, out: &mut W) -> Result<RunSummary> {
        let reporter = Reporter::new(self.config.report.format, self.config.report.sections);
        self.summary = RunSummary::default();

        for entry in TraceReader::new(reader) {
            if self.limit_reached() {
                self.summary.truncated = true;
                log::info!(
                    "Instruction limit {} reached; rest of trace ignored",
                    self.summary.executed
                );
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e @ SimError::MalformedTraceLine { .. })
                    if self.config.on_malformed == MalformedLinePolicy::Skip =>
                {
                    log::warn!("Skipping: {}", e);
                    self.summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = self.engine.execute(entry.word).map_err(|e| {
                log::error!("Line {}: {}", entry.line, e);
                e
            })?;
            self.summary.executed += 1;

            if self.config.report.every_step {
                writeln!(out, "{}", step_header(entry.line, &outcome))?;
                write!(out, "{}", reporter.render(&self.engine)?)?;
            }
        }

        log::info!(
            "Executed {} instructions ({} skipped): {}",
            self.summary.executed,
            self.summary.skipped,
            self.engine.stats()
        );
        Ok(self.summary)
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_instructions
            .is_some_and(|max| self.summary.executed >= max)
    }

    /// Render the end-of-run report
    pub fn report(&self) -> Result<String> {
        Reporter::new(self.config.report.format, self.config.report.sections).render(&self.engine)
    }

    /// Return engine and progress to the initial state
    pub fn reset(&mut self) {
        self.engine.reset();
        self.summary = RunSummary::default();
    }

    /// Simulated state
    pub fn engine(&self) -> &AccessEngine {
        &self.engine
    }

    /// Progress so far
    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

fn step_header(line: usize, outcome: &AccessOutcome) -> String {
    format!(
        "=== line {}: {} (set {}, tag {:04b}, word {}) {:?}",
        line, outcome.instruction, outcome.index, outcome.tag, outcome.address, outcome.event
    )
}
