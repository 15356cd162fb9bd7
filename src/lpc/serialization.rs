// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Binary dump format for counters.
//!
//! A dump is the bitmap's exact byte layout and nothing else: no magic
//! number, no version, no embedded length. The buffer length — a positive
//! multiple of 1024 bytes — is the only metadata, and fully determines the
//! restored counter's capacity. Bit `i` of the bitmap is bit `i % 8` of
//! byte `i / 8`.
//!
//! The set-bit count is deliberately not part of the format: it is
//! recomputed from the restored bitmap, so a dump can never smuggle in an
//! inconsistent cached count.

use crate::error::Error;
use crate::lpc::bitset::BitSet;
use crate::lpc::sketch::LpcSketch;

impl LpcSketch {
    /// Serializes the counter to its binary dump.
    ///
    /// The result length is `1024 * size_kib()` bytes and round-trips
    /// byte-for-byte through [`deserialize`](Self::deserialize).
    pub fn serialize(&self) -> Vec<u8> {
        self.map.to_bytes()
    }

    /// Restores a counter from a binary dump.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeInvalid`](crate::error::ErrorKind) if the
    /// buffer length is zero or not a multiple of 1024 bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let map = BitSet::from_bytes(bytes)?;
        let set_count = map.popcount();
        Ok(LpcSketch { map, set_count })
    }
}
