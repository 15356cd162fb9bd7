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

//! Hash mixing: avalanche finalizers for fixed-width integers and the
//! incremental MurmurHash3 constructions for arbitrary byte payloads.

mod murmurhash;

pub use self::murmurhash::MurmurHash3X64128;
pub use self::murmurhash::MurmurHash3X86128;
pub use self::murmurhash::MurmurHash3X8632;
pub use self::murmurhash::fmix32;
pub use self::murmurhash::fmix64;

/// The seed used by the counter's byte-hash path.
///
/// Zero is the seed of the published MurmurHash3 reference vectors, which
/// anchor this crate's hash tests. The choice is otherwise arbitrary, but it
/// is load-bearing for set operations: two counters can only be merged
/// meaningfully when every element was hashed with the same function and the
/// same seed, and once dumps of a counter have been stored the seed is fixed
/// forever. Keeping it a crate-level constant guarantees that.
pub(crate) const DEFAULT_UPDATE_SEED: u32 = 0;
