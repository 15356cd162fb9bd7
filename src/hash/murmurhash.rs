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

//! Incremental MurmurHash3.
//!
//! MurmurHash3 is a fast, non-cryptographic hash with excellent avalanche
//! and bit-independence properties. Three by-construction variants are
//! provided, differing only in lane width and count:
//!
//! - [`MurmurHash3X8632`]: one 32-bit lane over 4-byte blocks, 32-bit digest
//! - [`MurmurHash3X86128`]: four 32-bit lanes over 16-byte blocks, 128-bit digest
//! - [`MurmurHash3X64128`]: two 64-bit lanes over 16-byte blocks, 128-bit digest
//!
//! All three accept input in arbitrarily sized chunks: bytes that do not yet
//! form a complete block are held in a residual buffer, so callers never need
//! aligned (or even contiguous) input. Finalization folds the residual tail
//! and the total message length into the lanes without touching the running
//! state, so the digest of a value is independent of how its bytes were
//! chunked.
//!
//! Block words are read little-endian. Digests on big-endian targets would
//! differ from the reference vectors; such targets are outside this crate's
//! compatibility contract.

use std::hash::Hasher;

use byteorder::ByteOrder;
use byteorder::LE;

/// Finalization mix for 32-bit values: forces all bits to avalanche.
#[inline]
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

/// Finalization mix for 64-bit values: forces all bits to avalanche.
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}

const BLOCK_32: usize = 4;
const BLOCK_128: usize = 16;

/// Residual-byte buffer shared by all three constructions.
///
/// Holds strictly fewer bytes than one block at all times and tracks the
/// total message length. Complete blocks are handed to `mix` as they form;
/// whatever is left over at finalization time is the tail.
#[derive(Debug, Clone)]
struct BlockBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
    total: u64,
}

impl<const N: usize> BlockBuffer<N> {
    fn new() -> Self {
        BlockBuffer {
            buf: [0; N],
            len: 0,
            total: 0,
        }
    }

    /// Total bytes consumed so far, buffered residue included.
    fn message_len(&self) -> u64 {
        self.total + self.len as u64
    }

    /// The buffered bytes that do not yet form a complete block.
    fn residue(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn put(&mut self, mut bytes: &[u8], mut mix: impl FnMut(&[u8])) {
        if self.len + bytes.len() < N {
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            return;
        }

        // Complete the partially filled block first.
        if self.len != 0 {
            let wanted = N - self.len;
            self.buf[self.len..].copy_from_slice(&bytes[..wanted]);
            let block = self.buf;
            mix(&block);
            self.total += N as u64;
            bytes = &bytes[wanted..];
            self.len = 0;
        }

        let mut blocks = bytes.chunks_exact(N);
        for block in blocks.by_ref() {
            mix(block);
            self.total += N as u64;
        }

        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.len = rest.len();
    }
}

/// Reads up to 4 bytes little-endian, zero-padding the missing high bytes.
fn read_tail_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

/// Reads up to 8 bytes little-endian, zero-padding the missing high bytes.
fn read_tail_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

// ============================================================================
// x86 32-bit variant
// ============================================================================

const C1_32: u32 = 0xcc9e_2d51;
const C2_32: u32 = 0x1b87_3593;

fn mix_block_x86_32(h1: &mut u32, block: &[u8]) {
    let mut k1 = LE::read_u32(block);
    k1 = k1.wrapping_mul(C1_32);
    k1 = k1.rotate_left(15);
    k1 = k1.wrapping_mul(C2_32);

    *h1 ^= k1;
    *h1 = h1.rotate_left(13);
    *h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
}

/// MurmurHash3 x86 variant with a 32-bit digest over 4-byte blocks.
#[derive(Debug, Clone)]
pub struct MurmurHash3X8632 {
    h1: u32,
    buffer: BlockBuffer<BLOCK_32>,
}

impl MurmurHash3X8632 {
    /// Creates a hasher with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        MurmurHash3X8632 {
            h1: seed,
            buffer: BlockBuffer::new(),
        }
    }

    /// Produces the 32-bit digest of all bytes written so far.
    pub fn finish32(&self) -> u32 {
        let mut h1 = self.h1;

        // tail
        let rem = self.buffer.residue();
        if !rem.is_empty() {
            let mut k1 = read_tail_u32(rem);
            k1 = k1.wrapping_mul(C1_32);
            k1 = k1.rotate_left(15);
            k1 = k1.wrapping_mul(C2_32);
            h1 ^= k1;
        }

        h1 ^= self.buffer.message_len() as u32;
        fmix32(h1)
    }
}

impl Default for MurmurHash3X8632 {
    fn default() -> Self {
        Self::with_seed(super::DEFAULT_UPDATE_SEED)
    }
}

impl Hasher for MurmurHash3X8632 {
    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }

    fn write(&mut self, bytes: &[u8]) {
        let h1 = &mut self.h1;
        self.buffer.put(bytes, |block| mix_block_x86_32(h1, block));
    }
}

// ============================================================================
// x86 128-bit variant
// ============================================================================

const C1_X86_128: u32 = 0x239b_961b;
const C2_X86_128: u32 = 0xab0e_9789;
const C3_X86_128: u32 = 0x38b3_4ae5;
const C4_X86_128: u32 = 0xa1e3_8b93;

fn mix_block_x86_128(h: &mut [u32; 4], block: &[u8]) {
    let mut k1 = LE::read_u32(&block[0..4]);
    let mut k2 = LE::read_u32(&block[4..8]);
    let mut k3 = LE::read_u32(&block[8..12]);
    let mut k4 = LE::read_u32(&block[12..16]);

    k1 = k1.wrapping_mul(C1_X86_128);
    k1 = k1.rotate_left(15);
    k1 = k1.wrapping_mul(C2_X86_128);
    h[0] ^= k1;
    h[0] = h[0].rotate_left(19);
    h[0] = h[0].wrapping_add(h[1]);
    h[0] = h[0].wrapping_mul(5).wrapping_add(0x561c_cd1b);

    k2 = k2.wrapping_mul(C2_X86_128);
    k2 = k2.rotate_left(16);
    k2 = k2.wrapping_mul(C3_X86_128);
    h[1] ^= k2;
    h[1] = h[1].rotate_left(17);
    h[1] = h[1].wrapping_add(h[2]);
    h[1] = h[1].wrapping_mul(5).wrapping_add(0x0bca_a747);

    k3 = k3.wrapping_mul(C3_X86_128);
    k3 = k3.rotate_left(17);
    k3 = k3.wrapping_mul(C4_X86_128);
    h[2] ^= k3;
    h[2] = h[2].rotate_left(15);
    h[2] = h[2].wrapping_add(h[3]);
    h[2] = h[2].wrapping_mul(5).wrapping_add(0x96cd_1c35);

    k4 = k4.wrapping_mul(C4_X86_128);
    k4 = k4.rotate_left(18);
    k4 = k4.wrapping_mul(C1_X86_128);
    h[3] ^= k4;
    h[3] = h[3].rotate_left(13);
    h[3] = h[3].wrapping_add(h[0]);
    h[3] = h[3].wrapping_mul(5).wrapping_add(0x32ac_3b17);
}

/// MurmurHash3 x86 variant with a 128-bit digest over 16-byte blocks,
/// built from four interleaved 32-bit lanes.
#[derive(Debug, Clone)]
pub struct MurmurHash3X86128 {
    h: [u32; 4],
    buffer: BlockBuffer<BLOCK_128>,
}

impl MurmurHash3X86128 {
    /// Creates a hasher with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        MurmurHash3X86128 {
            h: [seed; 4],
            buffer: BlockBuffer::new(),
        }
    }

    /// Produces the 128-bit digest, as four 32-bit lanes, of all bytes
    /// written so far.
    pub fn finish128(&self) -> (u32, u32, u32, u32) {
        let mut h = self.h;

        // tail, highest lane first; the lane constants match the block rounds
        let rem = self.buffer.residue();
        if rem.len() > 12 {
            let mut k4 = read_tail_u32(&rem[12..]);
            k4 = k4.wrapping_mul(C4_X86_128);
            k4 = k4.rotate_left(18);
            k4 = k4.wrapping_mul(C1_X86_128);
            h[3] ^= k4;
        }
        if rem.len() > 8 {
            let mut k3 = read_tail_u32(&rem[8..rem.len().min(12)]);
            k3 = k3.wrapping_mul(C3_X86_128);
            k3 = k3.rotate_left(17);
            k3 = k3.wrapping_mul(C4_X86_128);
            h[2] ^= k3;
        }
        if rem.len() > 4 {
            let mut k2 = read_tail_u32(&rem[4..rem.len().min(8)]);
            k2 = k2.wrapping_mul(C2_X86_128);
            k2 = k2.rotate_left(16);
            k2 = k2.wrapping_mul(C3_X86_128);
            h[1] ^= k2;
        }
        if !rem.is_empty() {
            let mut k1 = read_tail_u32(&rem[..rem.len().min(4)]);
            k1 = k1.wrapping_mul(C1_X86_128);
            k1 = k1.rotate_left(15);
            k1 = k1.wrapping_mul(C2_X86_128);
            h[0] ^= k1;
        }

        let len = self.buffer.message_len() as u32;
        h[0] ^= len;
        h[1] ^= len;
        h[2] ^= len;
        h[3] ^= len;

        cross_mix_x86(&mut h);
        h[0] = fmix32(h[0]);
        h[1] = fmix32(h[1]);
        h[2] = fmix32(h[2]);
        h[3] = fmix32(h[3]);
        cross_mix_x86(&mut h);

        (h[0], h[1], h[2], h[3])
    }
}

fn cross_mix_x86(h: &mut [u32; 4]) {
    h[0] = h[0].wrapping_add(h[1]);
    h[0] = h[0].wrapping_add(h[2]);
    h[0] = h[0].wrapping_add(h[3]);
    h[1] = h[1].wrapping_add(h[0]);
    h[2] = h[2].wrapping_add(h[0]);
    h[3] = h[3].wrapping_add(h[0]);
}

impl Default for MurmurHash3X86128 {
    fn default() -> Self {
        Self::with_seed(super::DEFAULT_UPDATE_SEED)
    }
}

impl Hasher for MurmurHash3X86128 {
    fn finish(&self) -> u64 {
        let (h1, h2, _, _) = self.finish128();
        u64::from(h2) << 32 | u64::from(h1)
    }

    fn write(&mut self, bytes: &[u8]) {
        let h = &mut self.h;
        self.buffer.put(bytes, |block| mix_block_x86_128(h, block));
    }
}

// ============================================================================
// x64 128-bit variant
// ============================================================================

const C1_64: u64 = 0x87c3_7b91_1142_53d5;
const C2_64: u64 = 0x4cf5_ad43_2745_937f;

fn mix_block_x64_128(h: &mut [u64; 2], block: &[u8]) {
    let mut k1 = LE::read_u64(&block[0..8]);
    let mut k2 = LE::read_u64(&block[8..16]);

    k1 = k1.wrapping_mul(C1_64);
    k1 = k1.rotate_left(31);
    k1 = k1.wrapping_mul(C2_64);
    h[0] ^= k1;
    h[0] = h[0].rotate_left(27);
    h[0] = h[0].wrapping_add(h[1]);
    h[0] = h[0].wrapping_mul(5).wrapping_add(0x52dc_e729);

    k2 = k2.wrapping_mul(C2_64);
    k2 = k2.rotate_left(33);
    k2 = k2.wrapping_mul(C1_64);
    h[1] ^= k2;
    h[1] = h[1].rotate_left(31);
    h[1] = h[1].wrapping_add(h[0]);
    h[1] = h[1].wrapping_mul(5).wrapping_add(0x3849_5ab5);
}

/// MurmurHash3 x64 variant with a 128-bit digest over 16-byte blocks, built
/// from two interleaved 64-bit lanes.
///
/// This is the canonical construction for hashing arbitrary byte payloads in
/// this crate; the counter derives a bit index from the XOR of the two
/// digest halves.
#[derive(Debug, Clone)]
pub struct MurmurHash3X64128 {
    h: [u64; 2],
    buffer: BlockBuffer<BLOCK_128>,
}

impl MurmurHash3X64128 {
    /// Creates a hasher with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        MurmurHash3X64128 {
            h: [seed; 2],
            buffer: BlockBuffer::new(),
        }
    }

    /// Produces the 128-bit digest, as two 64-bit halves, of all bytes
    /// written so far.
    pub fn finish128(&self) -> (u64, u64) {
        let mut h1 = self.h[0];
        let mut h2 = self.h[1];

        // tail, second lane first
        let rem = self.buffer.residue();
        if rem.len() > 8 {
            let mut k2 = read_tail_u64(&rem[8..]);
            k2 = k2.wrapping_mul(C2_64);
            k2 = k2.rotate_left(33);
            k2 = k2.wrapping_mul(C1_64);
            h2 ^= k2;
        }
        if !rem.is_empty() {
            let mut k1 = read_tail_u64(&rem[..rem.len().min(8)]);
            k1 = k1.wrapping_mul(C1_64);
            k1 = k1.rotate_left(31);
            k1 = k1.wrapping_mul(C2_64);
            h1 ^= k1;
        }

        let len = self.buffer.message_len();
        h1 ^= len;
        h2 ^= len;
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        h1 = fmix64(h1);
        h2 = fmix64(h2);
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        (h1, h2)
    }
}

impl Default for MurmurHash3X64128 {
    fn default() -> Self {
        Self::with_seed(u64::from(super::DEFAULT_UPDATE_SEED))
    }
}

impl Hasher for MurmurHash3X64128 {
    fn finish(&self) -> u64 {
        self.finish128().0
    }

    fn write(&mut self, bytes: &[u8]) {
        let h = &mut self.h;
        self.buffer.put(bytes, |block| mix_block_x64_128(h, block));
    }
}
