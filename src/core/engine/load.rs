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

use super::{Access, AccessEngine, AccessEvent, WriteBack};
use crate::core::error::Result;
use crate::core::isa::reconstruct_address;

impl AccessEngine {
    /// LW: Load Word
    ///
    /// Format: lw rt, immediate($zero)
    /// Operation: rt = memory[immediate >> 2], through the cache
    ///
    /// # Returns
    ///
    /// The loaded word and how the access was served
    pub(super) fn op_lw(&mut self, access: &Access) -> Result<(u32, AccessEvent)> {
        let Access {
            index,
            tag,
            address,
            reg,
        } = *access;

        if let Some(block) = self.cache.lookup(index, tag) {
            self.cache.update_recency(index, block);
            let value = self.cache.block(index, block).data;
            self.registers.write(reg, value);
            return Ok((value, AccessEvent::LoadHit { block }));
        }

        let block = self.cache.select_victim(index);
        let victim = *self.cache.block(index, block);

        // No dirty bit: any valid victim is written back
        let writeback = if victim.valid {
            let wb_address = reconstruct_address(index, victim.tag);
            self.memory.write(wb_address, victim.data)?;
            Some(WriteBack {
                address: wb_address,
                data: victim.data,
            })
        } else {
            None
        };

        let value = self.memory.read(address)?;
        self.cache.install(index, block, tag, value);
        self.cache.update_recency(index, block);
        self.registers.write(reg, value);

        Ok((value, AccessEvent::LoadMiss { block, writeback }))
    }
}
