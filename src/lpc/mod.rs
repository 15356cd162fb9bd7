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

//! Linear probabilistic counting sketch for cardinality estimation.
//!
//! # Overview
//!
//! A linear probabilistic counter maps every inserted element, via a hash,
//! to one bit of a fixed-size bitmap. With `m` bits and `c` of them set, the
//! number of distinct elements seen is estimated as `-m * ln((m - c) / m)`.
//! The bitmap size is a memory budget chosen at construction, in whole KiB,
//! and bounds the counter's footprint for its entire lifetime.
//!
//! Accuracy degrades as the load factor (`c / m`) approaches 1; once every
//! bit is set, the estimate degenerates to `m` itself. Size the bitmap
//! generously relative to the expected cardinality.
//!
//! Counters of equal capacity can be merged: the bitwise OR of their bitmaps
//! is an exact union of the underlying "seen index" sets, so an estimate
//! taken after [`LpcSketch::merge`] approximates the cardinality of the
//! combined streams, with shared elements counted once.
//!
//! # Example
//!
//! ```
//! use linear_counting::lpc::LpcSketch;
//!
//! // One counter per shard, 32 KiB each.
//! let mut shard_a = LpcSketch::new(32).unwrap();
//! shard_a.put("alice");
//! shard_a.put("bob");
//!
//! let mut shard_b = LpcSketch::new(32).unwrap();
//! shard_b.put("bob");
//! shard_b.put("carol");
//!
//! let combined = LpcSketch::merge(&[shard_a, shard_b]).unwrap();
//! assert_eq!(combined.estimate(), 3);
//! ```

mod bitset;
mod serialization;
mod sketch;
mod union;

pub use self::bitset::BitSet;
pub use self::sketch::Element;
pub use self::sketch::LpcSketch;
