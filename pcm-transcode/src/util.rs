// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `util` module provides a repository of commonly used utility functions sorted into distinct
//! categories.

pub mod bits {
    //! Utilities for bit manipulation.

    /// Sign extends an arbitrary, 32-bit or less, signed two's complement integer stored within an
    /// u32 to a full width i32.
    #[inline(always)]
    pub fn sign_extend_leq32_to_i32(value: u32, width: u32) -> i32 {
        // Rust uses an arithmetic shift right (the original sign bit is repeatedly shifted on) for
        // signed integer types. Therefore, shift the value to the right-hand side of the integer,
        // then shift it back to extend the sign bit.
        (value.wrapping_shl(32 - width) as i32).wrapping_shr(32 - width)
    }

    /// Moves an integer, `width` bits wide, to the most-significant end of a u32. The vacated
    /// low-order bits are zero.
    #[inline(always)]
    pub fn left_align_u32(value: u32, width: u32) -> u32 {
        debug_assert!(width > 0 && width <= 32);
        value.wrapping_shl(32 - width)
    }

    /// Takes the `width` most-significant bits of a u32 and moves them to the least-significant
    /// end. The discarded low-order bits are truncated, not rounded.
    #[inline(always)]
    pub fn right_align_u32(value: u32, width: u32) -> u32 {
        debug_assert!(width > 0 && width <= 32);
        value.wrapping_shr(32 - width)
    }

}
