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

//! Merging counters built over independent streams.
//!
//! Merging is a bitwise OR of equal-size bitmaps and is exact at the bitmap
//! level: the merged counter carries the true union of the inputs' "seen
//! index" sets. An estimate taken afterward approximates the cardinality of
//! the union of the source streams — elements seen by several inputs count
//! once, so the result is not the sum of the individual estimates.
//!
//! The mutation contract is explicit: [`LpcSketch::merge`] reads all inputs
//! and builds a fresh counter, [`LpcSketch::merge_into`] accumulates into
//! `self` and leaves every source untouched.

use crate::error::Error;
use crate::error::ErrorKind;
use crate::lpc::sketch::LpcSketch;

impl LpcSketch {
    /// Builds a new counter holding the union of all given counters.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::EmptyInput`] if `sketches` is empty and
    /// [`ErrorKind::SizeMismatch`] if the counters disagree on capacity.
    pub fn merge(sketches: &[LpcSketch]) -> Result<LpcSketch, Error> {
        let (first, rest) = sketches.split_first().ok_or_else(|| {
            Error::new(ErrorKind::EmptyInput, "merge requires at least one counter")
        })?;

        let mut merged = first.clone();
        for sketch in rest {
            merged.map.union_with(&sketch.map)?;
        }
        merged.set_count = merged.map.popcount();
        Ok(merged)
    }

    /// ORs every source counter's bitmap into `self` and refreshes the
    /// set-bit count.
    ///
    /// All sizes are validated before the first OR, so a failed call leaves
    /// `self` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::EmptyInput`] if `sources` is empty and
    /// [`ErrorKind::SizeMismatch`] if any source disagrees with `self` on
    /// capacity.
    pub fn merge_into(&mut self, sources: &[LpcSketch]) -> Result<(), Error> {
        if sources.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyInput,
                "merge requires at least one counter",
            ));
        }
        for source in sources {
            if source.capacity_bits() != self.capacity_bits() {
                return Err(Error::new(
                    ErrorKind::SizeMismatch,
                    "cannot merge counters of different capacities",
                )
                .with_context("target_kib", self.size_kib())
                .with_context("source_kib", source.size_kib()));
            }
        }

        for source in sources {
            self.map.union_with(&source.map)?;
        }
        self.set_count = self.map.popcount();
        Ok(())
    }

    /// ORs a single counter into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeMismatch`] if the capacities differ.
    pub fn union_with(&mut self, other: &LpcSketch) -> Result<(), Error> {
        self.map.union_with(&other.map)?;
        self.set_count = self.map.popcount();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_empty_input() {
        let err = LpcSketch::merge(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_merge_single_counter_is_identity() {
        let mut sketch = LpcSketch::new(1).unwrap();
        sketch.put(42u64);
        let merged = LpcSketch::merge(std::slice::from_ref(&sketch)).unwrap();
        assert_eq!(merged, sketch);
    }

    #[test]
    fn test_merge_into_failure_leaves_target_unchanged() {
        let mut target = LpcSketch::new(1).unwrap();
        target.put(1u64);
        let snapshot = target.clone();

        let bigger = LpcSketch::new(2).unwrap();
        let err = target.merge_into(&[bigger]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
        assert_eq!(target, snapshot);

        let err = target.merge_into(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert_eq!(target, snapshot);
    }
}
