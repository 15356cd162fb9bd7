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

use linear_counting::error::ErrorKind;
use linear_counting::lpc::LpcSketch;

#[test]
fn test_dump_length_is_the_capacity() {
    let sketch = LpcSketch::new(32).unwrap();
    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), 32 * 1024);
    assert_eq!(bytes.len() % 1024, 0);
}

#[test]
fn test_empty_round_trip() {
    let sketch = LpcSketch::new(1).unwrap();
    let restored = LpcSketch::deserialize(&sketch.serialize()).unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored, sketch);
}

#[test]
fn test_round_trip_preserves_everything() {
    let mut sketch = LpcSketch::new(32).unwrap();
    for i in 0..5000u64 {
        sketch.put(i);
    }
    sketch.put("and a string");
    sketch.put(7u32);

    let bytes = sketch.serialize();
    let restored = LpcSketch::deserialize(&bytes).unwrap();

    assert_eq!(restored.estimate(), sketch.estimate());
    assert_eq!(restored.size_kib(), sketch.size_kib());
    assert_eq!(restored.bits_used(), sketch.bits_used());
    assert_eq!(restored.serialize(), bytes);
    assert_eq!(restored, sketch);
}

#[test]
fn test_restored_counter_keeps_counting() {
    let mut sketch = LpcSketch::new(32).unwrap();
    sketch.put(100u32);
    sketch.put(100u64);
    sketch.put("100");

    let mut restored = LpcSketch::deserialize(&sketch.serialize()).unwrap();
    assert_eq!(restored.estimate(), 3);

    // an element already present lands on an already-set bit
    restored.put("100");
    assert_eq!(restored.estimate(), 3);

    restored.put("101");
    assert_eq!(restored.estimate(), 4);
}

#[test]
fn test_corrupt_dump_rejected() {
    for len in [1usize, 512, 1023, 1025, 4095] {
        let err = LpcSketch::deserialize(&vec![0u8; len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeInvalid, "len {len}");
    }

    let err = LpcSketch::deserialize(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeInvalid);
}

#[test]
fn test_saturated_counter_reports_bitmap_size() {
    // force every bit set through a restore; put() alone cannot realistically
    // saturate a bitmap
    let sketch = LpcSketch::deserialize(&vec![0xffu8; 1024]).unwrap();
    assert_eq!(sketch.bits_used(), sketch.capacity_bits());
    assert_eq!(sketch.load_factor(), 1.0);
    assert_eq!(sketch.estimate(), 8192);
}
