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

use byteorder::ByteOrder;
use byteorder::LE;

use crate::error::Error;
use crate::error::ErrorKind;

/// Bits per KiB of backing storage; all bit lengths are multiples of this.
pub(crate) const BITS_PER_KIB: u64 = 8192;

const BYTES_PER_KIB: usize = 1024;
const BITS_PER_WORD: u64 = 64;

/// A fixed-length, word-packed array of bits.
///
/// The length is chosen at construction, is always a positive multiple of
/// 8192 bits (1 KiB of storage), and never changes afterward. Bits only ever
/// flip from 0 to 1; there is no clearing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    num_bits: u64,
}

impl BitSet {
    /// Allocates an all-zero bit set of `num_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeInvalid`] if `num_bits` is zero or not a
    /// multiple of 8192.
    pub fn new(num_bits: u64) -> Result<Self, Error> {
        if num_bits == 0 || num_bits % BITS_PER_KIB != 0 {
            return Err(Error::new(
                ErrorKind::SizeInvalid,
                "bit length must be a positive multiple of 8192",
            )
            .with_context("num_bits", num_bits));
        }

        Ok(BitSet {
            words: vec![0u64; (num_bits / BITS_PER_WORD) as usize],
            num_bits,
        })
    }

    /// Adopts `bytes` as the packed bit storage.
    ///
    /// Words are read little-endian, so bit `i` of the array is bit `i % 8`
    /// of byte `i / 8` of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeInvalid`] if the buffer length is zero or
    /// not a multiple of 1024 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() || bytes.len() % BYTES_PER_KIB != 0 {
            return Err(Error::new(ErrorKind::SizeInvalid, "dump is broken")
                .with_context("num_bytes", bytes.len()));
        }

        Ok(BitSet {
            words: bytes.chunks_exact(8).map(LE::read_u64).collect(),
            num_bits: bytes.len() as u64 * 8,
        })
    }

    /// Returns the exact byte layout of the bit array.
    ///
    /// The result length is always a multiple of 1024 and feeds back into
    /// [`BitSet::from_bytes`] unchanged.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.num_bytes()];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(&self.words) {
            LE::write_u64(chunk, *word);
        }
        bytes
    }

    /// Tests a single bit. Callers guarantee `index < num_bits`.
    pub fn get(&self, index: u64) -> bool {
        debug_assert!(index < self.num_bits);
        let mask = 1u64 << (index % BITS_PER_WORD);
        self.words[(index / BITS_PER_WORD) as usize] & mask != 0
    }

    /// Sets a single bit, returning whether it was newly set.
    ///
    /// Callers guarantee `index < num_bits`.
    pub fn set(&mut self, index: u64) -> bool {
        debug_assert!(index < self.num_bits);
        let word = &mut self.words[(index / BITS_PER_WORD) as usize];
        let mask = 1u64 << (index % BITS_PER_WORD);
        if *word & mask == 0 {
            *word |= mask;
            true
        } else {
            false
        }
    }

    /// Returns the number of set bits.
    pub fn popcount(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// ORs every bit of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeMismatch`] if the two bit sets differ in
    /// length.
    pub fn union_with(&mut self, other: &BitSet) -> Result<(), Error> {
        if self.num_bits != other.num_bits {
            return Err(Error::new(
                ErrorKind::SizeMismatch,
                "cannot union bit sets of different lengths",
            )
            .with_context("self_bits", self.num_bits)
            .with_context("other_bits", other.num_bits));
        }

        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= *other_word;
        }
        Ok(())
    }

    /// Length in bits.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Length of the packed storage in bytes.
    pub fn num_bytes(&self) -> usize {
        self.words.len() * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(BitSet::new(8192).is_ok());
        assert!(BitSet::new(8192 * 32).is_ok());

        assert_eq!(BitSet::new(0).unwrap_err().kind(), ErrorKind::SizeInvalid);
        assert_eq!(
            BitSet::new(8191).unwrap_err().kind(),
            ErrorKind::SizeInvalid
        );
        assert_eq!(
            BitSet::new(8192 + 64).unwrap_err().kind(),
            ErrorKind::SizeInvalid
        );
    }

    #[test]
    fn test_set_and_get() {
        let mut bits = BitSet::new(8192).unwrap();
        assert!(!bits.get(0));
        assert!(!bits.get(8191));

        assert!(bits.set(0));
        assert!(bits.set(8191));
        assert!(bits.set(100));
        assert!(bits.get(0));
        assert!(bits.get(100));
        assert!(bits.get(8191));

        // setting again reports no change
        assert!(!bits.set(100));
        assert_eq!(bits.popcount(), 3);
    }

    #[test]
    fn test_bit_index_maps_to_byte_layout() {
        let mut bits = BitSet::new(8192).unwrap();
        assert!(bits.set(0));
        assert!(bits.set(9));
        assert!(bits.set(70));

        let bytes = bits.to_bytes();
        assert_eq!(bytes.len(), 1024);
        assert_eq!(bytes[0], 0b0000_0001);
        assert_eq!(bytes[1], 0b0000_0010);
        assert_eq!(bytes[8], 0b0100_0000);
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut bits = BitSet::new(8192 * 2).unwrap();
        for index in [0u64, 7, 63, 64, 1023, 8191, 8192, 16383] {
            bits.set(index);
        }

        let restored = BitSet::from_bytes(&bits.to_bytes()).unwrap();
        assert_eq!(restored, bits);
        assert_eq!(restored.popcount(), 8);
        assert_eq!(restored.num_bits(), 8192 * 2);
    }

    #[test]
    fn test_from_bytes_rejects_broken_dump() {
        assert_eq!(
            BitSet::from_bytes(&[]).unwrap_err().kind(),
            ErrorKind::SizeInvalid
        );
        assert_eq!(
            BitSet::from_bytes(&vec![0u8; 1023]).unwrap_err().kind(),
            ErrorKind::SizeInvalid
        );
        assert_eq!(
            BitSet::from_bytes(&vec![0u8; 1536]).unwrap_err().kind(),
            ErrorKind::SizeInvalid
        );
    }

    #[test]
    fn test_union_with() {
        let mut left = BitSet::new(8192).unwrap();
        let mut right = BitSet::new(8192).unwrap();
        left.set(1);
        left.set(500);
        right.set(500);
        right.set(4096);

        left.union_with(&right).unwrap();
        assert_eq!(left.popcount(), 3);
        assert!(left.get(1));
        assert!(left.get(500));
        assert!(left.get(4096));

        // sources are read-only
        assert_eq!(right.popcount(), 2);
    }

    #[test]
    fn test_union_with_rejects_length_mismatch() {
        let mut left = BitSet::new(8192).unwrap();
        let right = BitSet::new(8192 * 2).unwrap();
        assert_eq!(
            left.union_with(&right).unwrap_err().kind(),
            ErrorKind::SizeMismatch
        );
    }
}
