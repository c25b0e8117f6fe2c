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

use super::{Access, AccessEngine, AccessEvent};
use crate::core::error::Result;

impl AccessEngine {
    /// SW: Store Word
    ///
    /// Format: sw rt, immediate($zero)
    /// Operation: memory[immediate >> 2] = rt, through the cache
    ///
    /// A hit updates only the cached block. A miss is no-write-allocate:
    /// memory takes the word and the set is left exactly as it was.
    ///
    /// # Returns
    ///
    /// The stored word and how the access was served
    pub(super) fn op_sw(&mut self, access: &Access) -> Result<(u32, AccessEvent)> {
        let value = self.registers.read(access.reg);

        match self.cache.lookup(access.index, access.tag) {
            Some(block) => {
                self.cache.write_data(access.index, block, value);
                self.cache.update_recency(access.index, block);
                Ok((value, AccessEvent::StoreHit { block }))
            }
            None => {
                self.memory.write(access.address, value)?;
                Ok((value, AccessEvent::StoreMiss))
            }
        }
    }
}
