// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `sample` module defines the fixed-size sample word that all primitive transforms operate on,
//! and the packing rules for 24-bit samples.

use std::fmt;

/// The widest sample, in bytes, the engine handles.
pub const MAX_SAMPLE_WIDTH: usize = 4;

/// A `Word` is a single sample, copied out of a buffer, in its in-memory byte layout.
///
/// A word is a fixed 4-byte window of which only the first `width` bytes are meaningful. The
/// bytes are never interpreted on their own. The transforms decide whether the word holds a
/// native or foreign byte order value, and whether that value is an integer or a float.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Word {
    bytes: [u8; MAX_SAMPLE_WIDTH],
    width: u8,
}

impl Word {
    /// Copy a sample out of `buf`. The length of `buf` is the width of the sample and must be
    /// between 1 and 4 bytes.
    #[inline(always)]
    pub fn from_bytes(buf: &[u8]) -> Self {
        debug_assert!(!buf.is_empty() && buf.len() <= MAX_SAMPLE_WIDTH);

        let width = buf.len().min(MAX_SAMPLE_WIDTH);
        let mut bytes = [0; MAX_SAMPLE_WIDTH];
        bytes[..width].copy_from_slice(&buf[..width]);

        Word { bytes, width: width as u8 }
    }

    /// Instantiate a word from the `width` least-significant bytes of `value`, laid out in native
    /// byte order.
    #[inline(always)]
    pub fn from_u32_ne(value: u32, width: usize) -> Self {
        debug_assert!(width > 0 && width <= MAX_SAMPLE_WIDTH);

        let b = value.to_ne_bytes();
        let mut bytes = [0; MAX_SAMPLE_WIDTH];

        if cfg!(target_endian = "little") {
            // In little-endian the least-significant bytes come first.
            bytes[..width].copy_from_slice(&b[..width]);
        }
        else {
            // In big-endian the least-significant bytes come last.
            bytes[..width].copy_from_slice(&b[MAX_SAMPLE_WIDTH - width..]);
        }

        Word { bytes, width: width as u8 }
    }

    /// Instantiate a 4-byte word holding the native memory representation of a float.
    #[inline(always)]
    pub fn from_f32_ne(value: f32) -> Self {
        Word { bytes: value.to_ne_bytes(), width: MAX_SAMPLE_WIDTH as u8 }
    }

    /// Interpret the word as an unsigned integer in native byte order, zero-extended to a u32.
    #[inline(always)]
    pub fn to_u32_ne(&self) -> u32 {
        let width = self.width();
        let mut b = [0; MAX_SAMPLE_WIDTH];

        if cfg!(target_endian = "little") {
            b[..width].copy_from_slice(&self.bytes[..width]);
        }
        else {
            b[MAX_SAMPLE_WIDTH - width..].copy_from_slice(&self.bytes[..width]);
        }

        u32::from_ne_bytes(b)
    }

    /// Interpret the word as a float in native byte order.
    #[inline(always)]
    pub fn to_f32_ne(&self) -> f32 {
        debug_assert!(self.width() == MAX_SAMPLE_WIDTH);
        f32::from_ne_bytes(self.bytes)
    }

    /// The number of meaningful bytes in the word.
    #[inline(always)]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Get the meaningful bytes of the word.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.width()]
    }

    /// Get the meaningful bytes of the word as a mutable slice.
    #[inline(always)]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let width = self.width();
        &mut self.bytes[..width]
    }

    /// Copy the word into `dst`. The length of `dst` must equal the width of the word.
    #[inline(always)]
    pub fn write_to(&self, dst: &mut [u8]) {
        debug_assert!(dst.len() == self.width());
        dst.copy_from_slice(self.as_bytes());
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:02x?})", self.as_bytes())
    }
}

/// Pack a 32-bit two's-complement sample into a 24-bit sample in native byte order.
///
/// A 24-bit sample holds the three most-significant bytes of a 32-bit sample. The least
/// significant byte is implicitly zero and is dropped here.
#[inline(always)]
pub fn pack_i24(value: i32) -> [u8; 3] {
    let b = value.to_ne_bytes();

    if cfg!(target_endian = "little") {
        // In little-endian the LSB is the first byte. Drop it.
        [b[1], b[2], b[3]]
    }
    else {
        // In big-endian the LSB is the last byte. Drop it.
        [b[0], b[1], b[2]]
    }
}

/// Unpack a 24-bit sample in native byte order into a 32-bit two's-complement sample. The
/// least-significant byte of the result is always zero.
#[inline(always)]
pub fn unpack_i24(bytes: [u8; 3]) -> i32 {
    if cfg!(target_endian = "little") {
        i32::from_ne_bytes([0, bytes[0], bytes[1], bytes[2]])
    }
    else {
        i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], 0])
    }
}
