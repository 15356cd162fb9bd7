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

//! # Linear probabilistic counting
//!
//! This library estimates the number of distinct elements in a stream without
//! storing the elements themselves. Each inserted value is hashed to a single
//! bit of a fixed-size bitmap; the estimate is derived from the fraction of
//! bits still unset. Memory usage is chosen up front, in whole KiB, and never
//! grows.
//!
//! Counters built on different shards can be serialized, shipped and merged:
//! the union of two bitmaps of equal size is an exact union of the underlying
//! "seen index" sets, so the merged estimate approximates the cardinality of
//! the combined streams.
//!
//! ```
//! use linear_counting::lpc::LpcSketch;
//!
//! let mut counter = LpcSketch::new(32).unwrap();
//! counter.put("alice");
//! counter.put("bob");
//! counter.put("alice");
//! assert_eq!(counter.estimate(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod error;
pub mod hash;
pub mod lpc;
