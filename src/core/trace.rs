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

//! Instruction trace reader
//!
//! A trace is a text stream with one instruction per line, written as
//! exactly 32 `'0'`/`'1'` characters, most significant bit first:
//!
//! ```text
//! 10001100000100000000000000101000
//! 10101100000100010000000001001000
//! ```
//!
//! Trailing whitespace (including `\r`) is ignored and blank lines are
//! skipped. Anything else is a [`SimError::MalformedTraceLine`]; nothing is
//! ever padded or guessed.

use crate::core::error::{Result, SimError};
use serde::Deserialize;
use std::io::BufRead;

/// Instruction width in characters
pub const INSTRUCTION_BITS: usize = 32;

/// What to do with a line that is not a 32-bit binary string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop and report the error
    #[default]
    Abort,
    /// Log a warning and continue with the next line
    Skip,
}

/// Parse one trace line
///
/// # Arguments
///
/// * `line_no` - 1-based line number, for error reporting
/// * `text` - Line contents without the newline
///
/// # Example
///
/// ```
/// use cachesim::core::trace::parse_line;
///
/// assert_eq!(parse_line(1, "10001100000100000000000000101000").unwrap(), 0x8C10_0028);
/// assert!(parse_line(2, "1000110000010000").is_err());
/// ```
pub fn parse_line(line_no: usize, text: &str) -> Result<u32> {
    let bits = text.trim_end();
    let malformed = |reason: String| SimError::MalformedTraceLine {
        line: line_no,
        reason,
    };

    if bits.len() != INSTRUCTION_BITS {
        return Err(malformed(format!(
            "expected {} bits, found {} characters",
            INSTRUCTION_BITS,
            bits.chars().count()
        )));
    }

    bits.chars().enumerate().try_fold(0u32, |acc, (col, c)| {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            other => {
                return Err(malformed(format!(
                    "unexpected character {:?} at column {}",
                    other,
                    col + 1
                )))
            }
        };
        Ok((acc << 1) | bit)
    })
}

/// One decoded trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-based line number in the source
    pub line: usize,
    /// Instruction word
    pub word: u32,
}

/// Iterator over the instructions of a trace
///
/// Yields `Err` for unreadable or malformed lines and leaves the decision to
/// stop to the caller.
///
/// # Example
///
/// ```
/// use cachesim::core::trace::TraceReader;
///
/// let text = "10001100000100000000000000101000\n\n10101100000100010000000001001000\n";
/// let words: Vec<u32> = TraceReader::new(text.as_bytes())
///     .map(|e| e.unwrap().word)
///     .collect();
/// assert_eq!(words, vec![0x8C10_0028, 0xAC11_0048]);
/// ```
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            // Raw bytes: a line that is not UTF-8 is malformed, not an I/O failure
            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(SimError::MalformedTraceLine {
                        line: self.line_no,
                        reason: format!("invalid UTF-8 at byte {}", e.valid_up_to() + 1),
                    }))
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(parse_line(self.line_no, line).map(|word| TraceEntry {
                line: self.line_no,
                word,
            }));
        }
    }
}

/// Render an instruction word as a trace line
pub fn format_line(word: u32) -> String {
    format!("{:032b}", word)
}
