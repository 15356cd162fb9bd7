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

use googletest::assert_that;
use googletest::prelude::near;
use linear_counting::error::ErrorKind;
use linear_counting::lpc::LpcSketch;

/// Counter with elements 100u32, 100u64 and "100" (estimate 3).
fn counter_a() -> LpcSketch {
    let mut sketch = LpcSketch::new(32).unwrap();
    sketch.put(100u32);
    sketch.put(100u64);
    sketch.put("100");
    sketch
}

/// Counter sharing exactly the 100u32 element with [`counter_a`]
/// (estimate 3).
fn counter_b() -> LpcSketch {
    let mut sketch = LpcSketch::new(32).unwrap();
    sketch.put(100u32);
    sketch.put(200u32);
    sketch.put("LP");
    sketch
}

#[test]
fn test_merge_counts_shared_elements_once() {
    let a = counter_a();
    let b = counter_b();
    assert_eq!(a.estimate(), 3);
    assert_eq!(b.estimate(), 3);

    let merged = LpcSketch::merge(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(merged.estimate(), 5);

    // inputs are read-only
    assert_eq!(a, counter_a());
    assert_eq!(b, counter_b());
}

#[test]
fn test_merge_is_commutative() {
    let a = counter_a();
    let b = counter_b();

    let ab = LpcSketch::merge(&[a.clone(), b.clone()]).unwrap();
    let ba = LpcSketch::merge(&[b, a]).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(ab.serialize(), ba.serialize());
}

#[test]
fn test_merge_is_bitmap_exact() {
    let a = counter_a();
    let b = counter_b();
    let merged = LpcSketch::merge(&[a.clone(), b.clone()]).unwrap();

    let expected: Vec<u8> = a
        .serialize()
        .iter()
        .zip(b.serialize())
        .map(|(x, y)| x | y)
        .collect();
    assert_eq!(merged.serialize(), expected);
}

#[test]
fn test_merge_into_accumulates() {
    let mut target = counter_a();
    target.merge_into(&[counter_b()]).unwrap();
    assert_eq!(target.estimate(), 5);

    // merging the same source again adds nothing
    target.merge_into(&[counter_b()]).unwrap();
    assert_eq!(target.estimate(), 5);
}

#[test]
fn test_union_with_pairwise() {
    let mut target = counter_a();
    target.union_with(&counter_b()).unwrap();
    assert_eq!(target.estimate(), 5);
    assert_eq!(target, LpcSketch::merge(&[counter_a(), counter_b()]).unwrap());
}

#[test]
fn test_merge_many_shards() {
    const SHARDS: u64 = 8;
    const PER_SHARD: u64 = 2000;
    const OVERLAP: u64 = 500;

    let mut shards = Vec::new();
    for s in 0..SHARDS {
        let mut sketch = LpcSketch::new(32).unwrap();
        // each shard shares the first OVERLAP elements with its neighbor
        let base = s * (PER_SHARD - OVERLAP);
        for i in base..base + PER_SHARD {
            sketch.put(i);
        }
        shards.push(sketch);
    }

    let merged = LpcSketch::merge(&shards).unwrap();
    let distinct = SHARDS * (PER_SHARD - OVERLAP) + OVERLAP;
    assert_that!(merged.estimate() as f64, near(distinct as f64, 300.0));
}

#[test]
fn test_merge_rejects_empty_input() {
    let err = LpcSketch::merge(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

#[test]
fn test_merge_rejects_size_mismatch() {
    let small = LpcSketch::new(32).unwrap();
    let large = LpcSketch::new(64).unwrap();

    let err = LpcSketch::merge(&[small.clone(), large.clone()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);

    let mut target = small;
    let err = target.merge_into(&[large.clone()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);

    let mut target = counter_a();
    let err = target.union_with(&large).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);
}

#[test]
fn test_merged_restored_counters() {
    // counters built in separate "processes" travel as dumps and merge after
    // restore
    let a = LpcSketch::deserialize(&counter_a().serialize()).unwrap();
    let b = LpcSketch::deserialize(&counter_b().serialize()).unwrap();

    let merged = LpcSketch::merge(&[a, b]).unwrap();
    assert_eq!(merged.estimate(), 5);
}
