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

//! Cache simulator command line
//!
//! Replays a load/store trace and prints the final cache contents.

use cachesim::core::config::SimConfig;
use cachesim::core::error::Result;
use cachesim::core::report::ReportFormat;
use cachesim::core::simulator::Simulator;
use clap::Parser;
use log::{error, info};
use std::io::Write;
use std::path::PathBuf;

/// 2-way set-associative cache simulator
#[derive(Parser)]
#[command(name = "cachesim")]
#[command(about = "Replay a lw/sw trace through a 2-way set-associative cache", long_about = None)]
struct Args {
    /// Trace file: one 32-character binary instruction per line
    trace: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Stop after this many instructions
    #[arg(short = 'n', long)]
    max_instructions: Option<usize>,

    /// Report format
    #[arg(short = 'f', long, value_enum)]
    format: Option<ReportFormat>,

    /// Dump state after every instruction
    #[arg(long)]
    every_step: bool,

    /// Skip malformed trace lines instead of stopping
    #[arg(long)]
    skip_malformed: bool,

    /// Leave the cache out of the report
    #[arg(long)]
    no_cache: bool,

    /// Include registers in the report
    #[arg(long)]
    registers: bool,

    /// Include main memory in the report
    #[arg(long)]
    memory: bool,

    /// Include access statistics in the report
    #[arg(long)]
    stats: bool,
}

impl Args {
    /// Layer flags on top of file and environment settings
    fn apply(&self, config: &mut SimConfig) {
        if let Some(trace) = &self.trace {
            config.trace = trace.clone();
        }
        if let Some(max) = self.max_instructions {
            config.max_instructions = Some(max);
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if self.skip_malformed {
            config.on_malformed = cachesim::core::trace::MalformedLinePolicy::Skip;
        }
        config.report.every_step |= self.every_step;

        let sections = &mut config.report.sections;
        sections.cache &= !self.no_cache;
        sections.registers |= self.registers;
        sections.memory |= self.memory;
        sections.stats |= self.stats;
    }
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    config.apply_env()?;
    args.apply(&mut config);
    Ok(config)
}

fn main() -> Result<()> {
    // Load .env file if present; a missing file is not an error
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("cachesim v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = load_config(&args).inspect_err(|e| error!("Invalid configuration: {}", e))?;

    let mut sim = Simulator::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = sim.run_file(&mut out);

    // Dump final state even when the run halted early
    match sim.report() {
        Ok(report) => write!(out, "{}", report)?,
        Err(e) => error!("Failed to render report: {}", e),
    }

    let summary = result?;
    info!(
        "Done: {} executed, {} skipped{}",
        summary.executed,
        summary.skipped,
        if summary.truncated { " (truncated)" } else { "" }
    );
    Ok(())
}
