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

use std::hash::Hasher;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::MurmurHash3X64128;
use crate::hash::fmix32;
use crate::hash::fmix64;
use crate::lpc::bitset::BITS_PER_KIB;
use crate::lpc::bitset::BitSet;

/// Values that can be inserted into an [`LpcSketch`].
///
/// Each implementation pins the hash construction for its input shape:
/// fixed-width integers go through the avalanche finalizer of their own
/// width, byte sequences through the incremental 128-bit hash. The estimate
/// only cares that equal values always land on the same bit and that
/// distinct values are dispersed uniformly, so the constructions never need
/// to agree with each other.
pub trait Element {
    /// The dispersed 64-bit hash this value's bit index is derived from.
    fn mixed_hash(&self) -> u64;
}

impl Element for u32 {
    fn mixed_hash(&self) -> u64 {
        u64::from(fmix32(*self))
    }
}

impl Element for u64 {
    fn mixed_hash(&self) -> u64 {
        fmix64(*self)
    }
}

impl Element for u128 {
    fn mixed_hash(&self) -> u64 {
        let lo = *self as u64;
        let hi = (*self >> 64) as u64;
        fmix64(lo ^ fmix64(hi))
    }
}

impl Element for &str {
    fn mixed_hash(&self) -> u64 {
        self.as_bytes().mixed_hash()
    }
}

impl Element for &[u8] {
    fn mixed_hash(&self) -> u64 {
        let mut hasher = MurmurHash3X64128::with_seed(u64::from(DEFAULT_UPDATE_SEED));
        hasher.write(self);
        let (lo, hi) = hasher.finish128();
        lo ^ hi
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
impl Element for uuid::Uuid {
    fn mixed_hash(&self) -> u64 {
        self.as_u128().mixed_hash()
    }
}

/// A linear probabilistic counter.
///
/// Owns one fixed-size bitmap and a cached count of its set bits. Elements
/// are inserted with [`put`](Self::put); the distinct-element estimate is
/// read with [`estimate`](Self::estimate). See the [module
/// docs](crate::lpc) for the estimator and its accuracy characteristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpcSketch {
    pub(crate) map: BitSet,
    pub(crate) set_count: u64,
}

impl LpcSketch {
    /// Creates an empty counter with a bitmap of `kilobytes` KiB
    /// (`8192 * kilobytes` bits).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeInvalid`] if `kilobytes` is zero or the
    /// resulting bit length overflows.
    pub fn new(kilobytes: u64) -> Result<Self, Error> {
        let num_bits = kilobytes.checked_mul(BITS_PER_KIB).ok_or_else(|| {
            Error::new(ErrorKind::SizeInvalid, "capacity overflows")
                .with_context("kilobytes", kilobytes)
        })?;

        Ok(LpcSketch {
            map: BitSet::new(num_bits)?,
            set_count: 0,
        })
    }

    /// Inserts an element.
    ///
    /// Sets the bit the element hashes to, if it is not set already.
    /// Inserting a value any number of times leaves the counter in the same
    /// state as inserting it once. Never fails.
    pub fn put<T: Element>(&mut self, value: T) {
        let index = value.mixed_hash() % self.map.num_bits();
        if self.map.set(index) {
            self.set_count += 1;
        }
    }

    /// Estimates the number of distinct elements inserted so far.
    ///
    /// With `m` bits of which `c` are set, the estimate is
    /// `-m * ln((m - c) / m)`, rounded to the nearest integer (ties away
    /// from zero). A fully saturated bitmap (`c == m`) returns `m` itself,
    /// which underestimates the true cardinality; there is no signal for
    /// this condition beyond [`load_factor`](Self::load_factor) reaching 1.
    pub fn estimate(&self) -> u64 {
        let m = self.map.num_bits();
        let c = self.set_count;
        if c == m {
            return m;
        }

        let m = m as f64;
        let unset_fraction = (self.map.num_bits() - c) as f64 / m;
        (-m * unset_fraction.ln()).round() as u64
    }

    /// Returns the counter's capacity in KiB, as passed to [`new`](Self::new).
    pub fn size_kib(&self) -> u64 {
        self.map.num_bits() / BITS_PER_KIB
    }

    /// Returns the bitmap length in bits.
    pub fn capacity_bits(&self) -> u64 {
        self.map.num_bits()
    }

    /// Returns the number of bits currently set.
    pub fn bits_used(&self) -> u64 {
        self.set_count
    }

    /// Returns whether no element was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.set_count == 0
    }

    /// Returns the fraction of bits set.
    ///
    /// Values approaching 1 mean the estimate is degrading; at exactly 1 the
    /// saturation fallback of [`estimate`](Self::estimate) is in effect.
    pub fn load_factor(&self) -> f64 {
        self.set_count as f64 / self.map.num_bits() as f64
    }
}
