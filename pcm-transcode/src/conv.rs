// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conv` module provides the primitive transforms every sample format conversion is composed
//! of.
//!
//! There are four primitives:
//!
//! * [`endian_swap`] reverses the byte order of a sample.
//! * [`sign_flip`] converts between two's-complement and offset binary integers.
//! * [`width_rescale`] widens or narrows an integer sample.
//! * [`int_to_float`] and [`float_to_int`] scale between integer and floating point samples.
//!
//! All primitives except `endian_swap` expect their input in native byte order. All of them are
//! pure, total, and never allocate.

use crate::sample::{pack_i24, unpack_i24, Word, MAX_SAMPLE_WIDTH};
use crate::util::bits::{left_align_u32, right_align_u32, sign_extend_leq32_to_i32};

// Notes on the integer and floating point scales
//
// 8-bit and 16-bit integer samples are scaled using their own bit depth. 24-bit samples are packed
// 32-bit samples, and therefore share the 32-bit scale.
//
// The integer to float conversion divides by 2^(n - 1), while the float to integer conversion
// multiplies by 2^(n - 1) - 1. Therefore the two are not exact inverses of one another. This
// asymmetry is deliberate.
//
// The float to integer conversion truncates towards zero and is not clamped. Floats outside the
// range [-1.0, 1.0] wrap around within the n-bit integer range. The product is computed in double
// precision so that the 32-bit scale, 2^31 - 1, is exact.

/// Get the number of bits a sample of the given width is scaled with.
#[inline(always)]
pub fn scale_bits(width: usize) -> u32 {
    match width {
        1 => 8,
        2 => 16,
        // Packed 24-bit samples live in the 32-bit domain.
        _ => 32,
    }
}

/// Reverse the byte order of a sample. Involutive.
#[inline(always)]
pub fn endian_swap(mut word: Word) -> Word {
    word.as_bytes_mut().reverse();
    word
}

/// Toggle the most-significant bit of a native byte order integer sample.
///
/// This is equivalent to adding or subtracting half the representable range and converts a signed
/// sample to an unsigned sample, or vice versa. Involutive.
#[inline(always)]
pub fn sign_flip(mut word: Word) -> Word {
    let width = word.width();

    // The index of the most-significant byte.
    let msb = if cfg!(target_endian = "little") { width - 1 } else { 0 };

    word.as_bytes_mut()[msb] ^= 0x80;
    word
}

/// Rescale a native byte order integer sample to `width` bytes.
///
/// Widening shifts the sample left and zero-fills the new low-order bytes. Narrowing shifts the
/// sample right and truncates the discarded low-order bytes.
#[inline(always)]
pub fn width_rescale(word: Word, width: usize) -> Word {
    debug_assert!(width > 0 && width <= MAX_SAMPLE_WIDTH);

    let aligned = left_align_u32(word.to_u32_ne(), 8 * word.width() as u32);
    Word::from_u32_ne(right_align_u32(aligned, 8 * width as u32), width)
}

/// Scale a signed, native byte order, integer sample to a native byte order float sample.
#[inline(always)]
pub fn int_to_float(word: Word) -> Word {
    let width = word.width();
    let bits = scale_bits(width);

    let value = match width {
        3 => unpack_i24([word.as_bytes()[0], word.as_bytes()[1], word.as_bytes()[2]]),
        _ => sign_extend_leq32_to_i32(word.to_u32_ne(), bits),
    };

    let scale = (1u64 << (bits - 1)) as f32;

    Word::from_f32_ne(value as f32 / scale)
}

/// Scale a native byte order float sample to a signed, native byte order integer sample that is
/// `width` bytes wide.
#[inline(always)]
pub fn float_to_int(word: Word, width: usize) -> Word {
    debug_assert!(width > 0 && width <= MAX_SAMPLE_WIDTH);

    let bits = scale_bits(width);
    let scale = ((1u64 << (bits - 1)) - 1) as f64;

    // The cast to i64 truncates towards zero. Then, the cast to u32 keeps the low 32 bits of the
    // two's-complement value which wraps out-of-range samples instead of saturating them.
    let value = (f64::from(word.to_f32_ne()) * scale) as i64 as u32;

    match width {
        3 => Word::from_bytes(&pack_i24(value as i32)),
        _ => Word::from_u32_ne(value, width),
    }
}
