// PCM Transcode
// Copyright (c) 2026 The PCM Transcode Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `format` module describes the physical encodings of a PCM sample.

use std::fmt;
use std::str::FromStr;

use crate::errors::{invalid_code_error, Error, Result};

/// The numeric kind of a sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// A two's-complement, or offset binary, integer.
    Int,
    /// An IEEE 754 floating point number.
    Float,
}

/// The byte order of a multi-byte sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// The byte order of the host.
    pub const NATIVE: Endianness =
        if cfg!(target_endian = "little") { Endianness::Little } else { Endianness::Big };
}

/// `SampleFormat` describes the data encoding of a PCM audio sample.
///
/// Every format is a combination of a kind, a signedness, a width, and a byte order. Floating
/// point samples are always signed and 4 bytes wide. Single byte samples have no byte order.
///
/// 24-bit samples follow the packed 24-bit convention: the 3 stored bytes are the three
/// most-significant bytes of a 32-bit sample whose least-significant byte is zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// The encoding is unknown. No conversion is possible to or from this format.
    #[default]
    Unknown,
    /// Single precision (32-bit) floating point, little-endian.
    F32LE,
    /// Single precision (32-bit) floating point, big-endian.
    F32BE,
    /// Signed 8-bit integer.
    S8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer, little-endian.
    S16LE,
    /// Signed 16-bit integer, big-endian.
    S16BE,
    /// Unsigned 16-bit integer, little-endian.
    U16LE,
    /// Unsigned 16-bit integer, big-endian.
    U16BE,
    /// Signed packed 24-bit integer, little-endian.
    S24LE,
    /// Signed packed 24-bit integer, big-endian.
    S24BE,
    /// Unsigned packed 24-bit integer, little-endian.
    U24LE,
    /// Unsigned packed 24-bit integer, big-endian.
    U24BE,
    /// Signed 32-bit integer, little-endian.
    S32LE,
    /// Signed 32-bit integer, big-endian.
    S32BE,
    /// Unsigned 32-bit integer, little-endian.
    U32LE,
    /// Unsigned 32-bit integer, big-endian.
    U32BE,
}

impl SampleFormat {
    /// The number of known sample formats.
    pub const COUNT: usize = 16;

    /// All known sample formats, in code order.
    pub const ALL: [SampleFormat; SampleFormat::COUNT] = [
        SampleFormat::F32LE,
        SampleFormat::F32BE,
        SampleFormat::S8,
        SampleFormat::U8,
        SampleFormat::S16LE,
        SampleFormat::S16BE,
        SampleFormat::U16LE,
        SampleFormat::U16BE,
        SampleFormat::S24LE,
        SampleFormat::S24BE,
        SampleFormat::U24LE,
        SampleFormat::U24BE,
        SampleFormat::S32LE,
        SampleFormat::S32BE,
        SampleFormat::U32LE,
        SampleFormat::U32BE,
    ];

    /// Get the sample format with the given kind, signedness, width in bytes, and byte order.
    ///
    /// Returns [`SampleFormat::Unknown`] if no such format exists. The byte order is ignored for
    /// single byte samples.
    pub fn from_parts(
        kind: SampleKind,
        signed: bool,
        width: usize,
        endianness: Endianness,
    ) -> SampleFormat {
        SampleFormat::ALL
            .iter()
            .copied()
            .find(|format| {
                format.kind() == Some(kind)
                    && format.is_signed() == signed
                    && format.width() == width
                    && (width == 1 || format.endianness() == Some(endianness))
            })
            .unwrap_or(SampleFormat::Unknown)
    }

    /// Get the sample format a decoder produces for integer PCM of the given bits per sample.
    ///
    /// Decoders emit signed little-endian samples. Bit depths other than 8, 16, 24, and 32 have
    /// no sample format.
    pub fn from_bits_per_sample(bits_per_sample: u32) -> SampleFormat {
        match bits_per_sample {
            8 => SampleFormat::S8,
            16 => SampleFormat::S16LE,
            24 => SampleFormat::S24LE,
            32 => SampleFormat::S32LE,
            _ => SampleFormat::Unknown,
        }
    }

    /// Returns true if the format is [`SampleFormat::Unknown`].
    pub fn is_unknown(&self) -> bool {
        *self == SampleFormat::Unknown
    }

    /// Get the kind of the sample, or `None` if the format is unknown.
    pub fn kind(&self) -> Option<SampleKind> {
        match self {
            SampleFormat::Unknown => None,
            SampleFormat::F32LE | SampleFormat::F32BE => Some(SampleKind::Float),
            _ => Some(SampleKind::Int),
        }
    }

    /// Returns true if the sample is signed. Floating point samples are always signed.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            SampleFormat::F32LE
                | SampleFormat::F32BE
                | SampleFormat::S8
                | SampleFormat::S16LE
                | SampleFormat::S16BE
                | SampleFormat::S24LE
                | SampleFormat::S24BE
                | SampleFormat::S32LE
                | SampleFormat::S32BE
        )
    }

    /// Get the width of one sample in bytes. The width of an unknown format is 0.
    pub fn width(&self) -> usize {
        match self {
            SampleFormat::Unknown => 0,
            SampleFormat::S8 | SampleFormat::U8 => 1,
            SampleFormat::S16LE | SampleFormat::S16BE => 2,
            SampleFormat::U16LE | SampleFormat::U16BE => 2,
            SampleFormat::S24LE | SampleFormat::S24BE => 3,
            SampleFormat::U24LE | SampleFormat::U24BE => 3,
            _ => 4,
        }
    }

    /// Get the byte order of the sample, or `None` for unknown and single byte formats.
    pub fn endianness(&self) -> Option<Endianness> {
        match self {
            SampleFormat::Unknown | SampleFormat::S8 | SampleFormat::U8 => None,
            SampleFormat::F32LE
            | SampleFormat::S16LE
            | SampleFormat::U16LE
            | SampleFormat::S24LE
            | SampleFormat::U24LE
            | SampleFormat::S32LE
            | SampleFormat::U32LE => Some(Endianness::Little),
            _ => Some(Endianness::Big),
        }
    }

    /// Returns true if the byte order of the sample differs from the host's.
    pub fn is_foreign_endian(&self) -> bool {
        match self.endianness() {
            Some(endianness) => endianness != Endianness::NATIVE,
            None => false,
        }
    }

    /// Get the integer code of the format. Codes are stable and may be persisted.
    pub fn to_code(&self) -> i64 {
        match self {
            SampleFormat::Unknown => 0,
            SampleFormat::F32LE => 1,
            SampleFormat::F32BE => 2,
            SampleFormat::S8 => 3,
            SampleFormat::U8 => 4,
            SampleFormat::S16LE => 5,
            SampleFormat::S16BE => 6,
            SampleFormat::U16LE => 7,
            SampleFormat::U16BE => 8,
            SampleFormat::S24LE => 9,
            SampleFormat::S24BE => 10,
            SampleFormat::U24LE => 11,
            SampleFormat::U24BE => 12,
            SampleFormat::S32LE => 13,
            SampleFormat::S32BE => 14,
            SampleFormat::U32LE => 15,
            SampleFormat::U32BE => 16,
        }
    }

    /// Get the sample format identified by an integer code.
    pub fn from_code(code: i64) -> Result<SampleFormat> {
        match code {
            0 => Ok(SampleFormat::Unknown),
            1..=16 => Ok(SampleFormat::ALL[(code - 1) as usize]),
            _ => invalid_code_error(code),
        }
    }

    /// Get the position of a known format in [`SampleFormat::ALL`].
    pub(crate) fn index(&self) -> Option<usize> {
        match self {
            SampleFormat::Unknown => None,
            _ => Some(self.to_code() as usize - 1),
        }
    }

    /// Get the short name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            SampleFormat::Unknown => "unknown",
            SampleFormat::F32LE => "f32le",
            SampleFormat::F32BE => "f32be",
            SampleFormat::S8 => "s8",
            SampleFormat::U8 => "u8",
            SampleFormat::S16LE => "s16le",
            SampleFormat::S16BE => "s16be",
            SampleFormat::U16LE => "u16le",
            SampleFormat::U16BE => "u16be",
            SampleFormat::S24LE => "s24le",
            SampleFormat::S24BE => "s24be",
            SampleFormat::U24LE => "u24le",
            SampleFormat::U24BE => "u24be",
            SampleFormat::S32LE => "s32le",
            SampleFormat::S32BE => "s32be",
            SampleFormat::U32LE => "u32le",
            SampleFormat::U32BE => "u32be",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();

        if name == "unknown" {
            return Ok(SampleFormat::Unknown);
        }

        SampleFormat::ALL
            .iter()
            .copied()
            .find(|format| format.name() == name)
            .ok_or(Error::InvalidFormatName)
    }
}
